
pub use helpers::*;
pub use test_protocol::{
    compressed, compressed_data, compressed_json, entity_data, entity_json, full, protocol,
};
pub use test_world::{TestEntity, TestWorld};
