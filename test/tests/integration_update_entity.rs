/// Integration tests for NetworkEntities::update_entity
/// These tests drive the create / update / defer decision through the
/// recording TestWorld factory.

use serde_json::json;

use netsync_shared::{
    ClientId, ComponentKey, DataType, EntitySignal, NetworkEntities, NetworkEntitiesError,
    NetworkId, SchemaError, UpdateOutcome,
};
use netsync_test::{
    assert_created_before, assert_not_created, compressed, compressed_data, entity_data, full,
    protocol, TestEntity, TestEntityBuilder, TestWorld,
};

fn client() -> ClientId {
    ClientId::from("client")
}

#[test]
fn first_uncompressed_update_creates_new_entity() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    let outcome = entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(entity_data()))
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Created {
            network_id: NetworkId::from("test1"),
            flushed: Vec::new(),
        }
    );
    assert_eq!(world.creation_count(), 1);
    assert_eq!(world.created()[0], entity_data().into_data().unwrap());
    assert!(entities.has_entity(&NetworkId::from("test1")));
}

#[test]
fn created_entity_keeps_first_update_data() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(entity_data()))
        .unwrap();

    let entity = entities.get_entity(&NetworkId::from("test1")).unwrap();
    let first_update = entity.first_update().unwrap();
    assert_eq!(first_update.template.as_str(), "#template1");
    assert_eq!(first_update.owner.as_str(), "abcdefg");
    assert_eq!(
        first_update.component(&ComponentKey::root("position")),
        Some(&json!("1 2 3"))
    );
    assert_eq!(entity.mount_parent(), None);
}

#[test]
fn second_uncompressed_update_updates_entity() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(entity_data()))
        .unwrap();
    let outcome = entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(entity_data()))
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::Updated(NetworkId::from("test1")));
    assert_eq!(world.creation_count(), 1);

    let entity = entities.get_entity(&NetworkId::from("test1")).unwrap();
    assert_eq!(entity.signal_count("networkUpdate"), 1);
    assert_eq!(
        entity.signals(),
        vec![EntitySignal::NetworkUpdate(entity_data().into_data().unwrap())]
    );
}

#[test]
fn update_reaches_directly_registered_entity() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    let element = world.spawn_detached(None);
    entities.register_entity(NetworkId::from("test1"), element.clone());

    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(entity_data()))
        .unwrap();

    assert_eq!(world.creation_count(), 0);
    assert!(element.received("networkUpdate"));
}

#[test]
fn compressed_data_when_entity_not_created_does_not_fail() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    let outcome = entities.update_entity(
        &schemas,
        &mut world,
        &client(),
        &DataType::Update,
        compressed(compressed_data()),
    );

    assert_eq!(outcome, Ok(UpdateOutcome::Ignored(NetworkId::from("test1"))));
    assert_eq!(world.creation_count(), 0);
    assert!(!entities.has_entity(&NetworkId::from("test1")));
    assert!(entities.pending_parents().is_empty());
}

#[test]
fn compressed_data_updates_entity() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(entity_data()))
        .unwrap();
    let outcome = entities
        .update_entity(
            &schemas,
            &mut world,
            &client(),
            &DataType::Update,
            compressed(compressed_data()),
        )
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::Updated(NetworkId::from("test1")));
    assert_eq!(world.creation_count(), 1);

    let entity = entities.get_entity(&NetworkId::from("test1")).unwrap();
    let update = entity.last_update().unwrap();
    assert!(!update.is_full_state);
    assert_eq!(update.components, entity_data().components);
}

#[test]
fn compressed_child_component_is_decompressed_by_schema_index() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    let create = TestEntityBuilder::new("box")
        .template("#template4")
        .component("position", "0 0 0")
        .component(".test-child---visible", true)
        .build();
    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(create))
        .unwrap();

    let delta = TestEntityBuilder::new("box")
        .template("#template4")
        .component("position", "1 1 1")
        .component(".test-child---visible", false)
        .build_compressed();
    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, compressed(delta))
        .unwrap();

    let update = entities
        .get_entity(&NetworkId::from("box"))
        .unwrap()
        .last_update()
        .unwrap();
    assert_eq!(
        update.component(&ComponentKey::child(".test-child", "visible")),
        Some(&json!(false))
    );
    assert_eq!(
        update.component(&ComponentKey::root("position")),
        Some(&json!("1 1 1"))
    );
}

#[test]
fn compressed_update_with_unknown_template_is_an_error() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(entity_data()))
        .unwrap();

    let mut delta = compressed_data();
    delta.template = "#unknown".into();
    let result = entities.update_entity(
        &schemas,
        &mut world,
        &client(),
        &DataType::Update,
        compressed(delta),
    );

    assert_eq!(
        result,
        Err(NetworkEntitiesError::Schema(SchemaError::NotFound {
            template: "#unknown".to_string(),
        }))
    );
    let entity = entities.get_entity(&NetworkId::from("test1")).unwrap();
    assert!(!entity.received("networkUpdate"));
}

#[test]
fn entity_with_parent_that_has_not_been_created_is_not_created_yet() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    let child = entity_data().with_parent("non-existent-parent");
    let outcome = entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(child))
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Deferred {
            network_id: NetworkId::from("test1"),
            parent: NetworkId::from("non-existent-parent"),
        }
    );
    assert_not_created!(world, "test1");
    assert!(entities.pending_parents().is_pending(&NetworkId::from("test1")));
}

#[test]
fn child_entities_created_after_parent() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    let child_1 = TestEntityBuilder::new("test-child-1").parent("test1").build();
    let child_2 = TestEntityBuilder::new("test-child-2").parent("test1").build();

    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(child_1))
        .unwrap();
    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(child_2))
        .unwrap();

    assert_not_created!(world, "test-child-1");
    assert_not_created!(world, "test-child-2");

    let outcome = entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(entity_data()))
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Created {
            network_id: NetworkId::from("test1"),
            flushed: vec![NetworkId::from("test-child-1"), NetworkId::from("test-child-2")],
        }
    );
    assert_eq!(world.creation_count(), 3);
    assert_created_before!(world, "test1", "test-child-1");
    assert_created_before!(world, "test1", "test-child-2");
    assert!(entities.pending_parents().is_empty());

    let parent = entities.get_entity(&NetworkId::from("test1")).unwrap();
    let child = entities.get_entity(&NetworkId::from("test-child-1")).unwrap();
    assert_eq!(child.mount_parent(), Some(parent.id()));
}

#[test]
fn child_of_existing_parent_is_created_immediately() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(entity_data()))
        .unwrap();
    let child = TestEntityBuilder::new("child").parent("test1").build();
    let outcome = entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(child))
        .unwrap();

    assert_eq!(outcome.created_count(), 1);
    assert_created_before!(world, "test1", "child");
}

#[test]
fn pending_child_keeps_latest_payload() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    let stale = TestEntityBuilder::new("child")
        .parent("test1")
        .component("position", "0 0 0")
        .build();
    let latest = TestEntityBuilder::new("child")
        .parent("test1")
        .component("position", "9 9 9")
        .build();

    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(stale))
        .unwrap();
    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(latest))
        .unwrap();
    assert_eq!(entities.pending_parents().len(), 1);

    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(entity_data()))
        .unwrap();

    assert_eq!(world.creation_count(), 2);
    let child = world.entity(&NetworkId::from("child")).unwrap();
    assert_eq!(
        child
            .first_update()
            .unwrap()
            .component(&ComponentKey::root("position")),
        Some(&json!("9 9 9"))
    );
}

#[test]
fn registering_parent_directly_does_not_flush_children() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    let child = TestEntityBuilder::new("child").parent("test1").build();
    entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(child.clone()))
        .unwrap();

    let parent = world.spawn_detached(None);
    entities.register_entity(NetworkId::from("test1"), parent);

    assert_not_created!(world, "child");
    assert!(entities.pending_parents().is_pending(&NetworkId::from("child")));

    // the next full update for the child finds its parent and builds it
    let outcome = entities
        .update_entity(&schemas, &mut world, &client(), &DataType::Update, full(child))
        .unwrap();
    assert_eq!(outcome.created_count(), 1);
    assert!(!entities.pending_parents().is_pending(&NetworkId::from("child")));
}

#[test]
fn update_type_does_not_change_dispatch() {
    let schemas = protocol();
    let mut world = TestWorld::new();
    let mut entities: NetworkEntities<TestEntity> = NetworkEntities::default();

    entities
        .update_entity(
            &schemas,
            &mut world,
            &client(),
            &DataType::UpdateMulti,
            full(entity_data()),
        )
        .unwrap();
    let outcome = entities
        .update_entity(
            &schemas,
            &mut world,
            &client(),
            &DataType::Custom("x".to_string()),
            full(entity_data()),
        )
        .unwrap();

    assert_eq!(world.creation_count(), 1);
    assert_eq!(outcome, UpdateOutcome::Updated(NetworkId::from("test1")));
}
