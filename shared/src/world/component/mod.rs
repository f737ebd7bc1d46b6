pub mod component_key;
