//! Tests for the milestone creation command.
use std::sync::{Arc, Mutex};

use crate::{
    command::create_milestones, forge::traits::MockForge,
    git::version::SemVerVersion, test_helpers::create_test_event,
};

#[test_log::test(tokio::test)]
async fn creates_patch_minor_and_major_milestones() {
    let created = Arc::new(Mutex::new(vec![]));
    let recorded = Arc::clone(&created);

    let mut forge = MockForge::new();
    forge
        .expect_create_milestone()
        .times(3)
        .returning(move |title| {
            recorded.lock().unwrap().push(title.to_string());
            Ok(true)
        });

    create_milestones::execute(&forge, &SemVerVersion::new(1, 2, 3))
        .await
        .unwrap();

    assert_eq!(*created.lock().unwrap(), vec!["1.2.4", "1.3.0", "2.0.0"]);
}

#[tokio::test]
async fn skips_existing_milestones() {
    let mut forge = MockForge::new();
    forge
        .expect_create_milestone()
        .withf(|title| title == "1.3.0")
        .times(1)
        .returning(|_| Ok(false));
    forge
        .expect_create_milestone()
        .withf(|title| title != "1.3.0")
        .times(2)
        .returning(|_| Ok(true));

    create_milestones::execute(&forge, &SemVerVersion::new(1, 2, 3))
        .await
        .unwrap();
}

#[tokio::test]
async fn stops_on_forge_errors() {
    let mut forge = MockForge::new();
    forge
        .expect_create_milestone()
        .times(1)
        .returning(|_| Err(color_eyre::eyre::eyre!("bad credentials")));

    let result =
        create_milestones::execute(&forge, &SemVerVersion::new(0, 9, 0)).await;

    assert!(result.is_err());
}

#[test]
fn milestone_with_largest_component_is_rejected() {
    for title in [
        "1.2.18446744073709551615",
        "1.18446744073709551615.0",
        "18446744073709551615.0.0",
    ] {
        assert!(
            create_test_event(title).version().is_err(),
            "expected {title:?} to be rejected"
        );
    }
}
