//! Plan catalog tests

mod common;

use std::sync::Arc;

use gympoint_core::{
    EnrollmentService, GymError, NewEnrollment, NewPlan, PlanCatalog, PlanPatch,
};
use gympoint_types::PlanId;
use rust_decimal_macros::dec;

use common::{MockStore, RecordingNotifier};

fn setup() -> (MockStore, PlanCatalog<MockStore>) {
    let store = MockStore::new();
    let catalog = PlanCatalog::new(Arc::new(store.clone()));
    (store, catalog)
}

fn gold() -> NewPlan {
    NewPlan {
        title: "Gold".to_string(),
        duration: 3,
        price: dec!(109.00),
    }
}

#[tokio::test]
async fn test_create_and_get() {
    let (_, catalog) = setup();

    let plan = catalog.create(gold()).await.unwrap();

    assert_eq!(plan.title, "Gold");
    assert_eq!(plan.total_price(), dec!(327.00));
    assert_eq!(catalog.get(plan.id).await.unwrap(), plan);
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() {
    let (_, catalog) = setup();

    let mut zero_months = gold();
    zero_months.duration = 0;
    assert!(matches!(
        catalog.create(zero_months).await,
        Err(GymError::Validation(_))
    ));

    let mut negative = gold();
    negative.price = dec!(-1);
    assert!(matches!(
        catalog.create(negative).await,
        Err(GymError::Validation(_))
    ));

    let mut untitled = gold();
    untitled.title = " ".to_string();
    assert!(matches!(
        catalog.create(untitled).await,
        Err(GymError::Validation(_))
    ));

    assert!(catalog.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_free_plan_is_allowed() {
    let (_, catalog) = setup();
    let mut trial = gold();
    trial.price = dec!(0);

    assert!(catalog.create(trial).await.is_ok());
}

#[tokio::test]
async fn test_update_merges_fields() {
    let (_, catalog) = setup();
    let plan = catalog.create(gold()).await.unwrap();

    let updated = catalog
        .update(
            plan.id,
            PlanPatch {
                price: Some(dec!(99.90)),
                ..PlanPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Gold");
    assert_eq!(updated.duration, 3);
    assert_eq!(updated.price, dec!(99.90));
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let (_, catalog) = setup();

    let err = catalog
        .update(
            PlanId(1),
            PlanPatch {
                duration: Some(-1),
                ..PlanPatch::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GymError::Validation(_)));
    assert!(matches!(
        catalog.update(PlanId(1), PlanPatch::default()).await,
        Err(GymError::PlanNotFound)
    ));
}

#[tokio::test]
async fn test_delete_missing_plan_is_not_found() {
    let (_, catalog) = setup();

    assert!(matches!(
        catalog.delete(PlanId(77)).await,
        Err(GymError::PlanNotFound)
    ));
}

#[tokio::test]
async fn test_delete_plan() {
    let (_, catalog) = setup();
    let plan = catalog.create(gold()).await.unwrap();

    catalog.delete(plan.id).await.unwrap();

    assert!(matches!(
        catalog.get(plan.id).await,
        Err(GymError::PlanNotFound)
    ));
}

#[tokio::test]
async fn test_delete_plan_in_use_is_blocked() {
    let (store, catalog) = setup();
    let repo = Arc::new(store.clone());
    let enrollments = EnrollmentService::new(
        Arc::clone(&repo),
        Arc::clone(&repo),
        repo,
        Arc::new(RecordingNotifier::new()),
    );
    let plan = catalog.create(gold()).await.unwrap();
    let student = store.insert_student("Ana Souza", "ana@example.com");
    enrollments
        .enroll(NewEnrollment {
            student_id: student,
            plan_id: plan.id.0,
            start_date: "2023-01-01".to_string(),
        })
        .await
        .unwrap();

    assert!(matches!(
        catalog.delete(plan.id).await,
        Err(GymError::PlanInUse)
    ));
    assert!(catalog.get(plan.id).await.is_ok());
}

#[tokio::test]
async fn test_price_beyond_plan_column_is_rejected() {
    let (_, catalog) = setup();
    let mut pricey = gold();
    pricey.price = dec!(100000000);

    assert!(matches!(
        catalog.create(pricey).await,
        Err(GymError::Validation(_))
    ));
    assert!(catalog.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_total_beyond_enrollment_column_is_rejected() {
    let (_, catalog) = setup();
    let lifetime = NewPlan {
        title: "Lifetime".to_string(),
        duration: 20_000,
        price: dec!(99999999.99),
    };

    assert!(matches!(
        catalog.create(lifetime).await,
        Err(GymError::Validation(_))
    ));

    let plan = catalog.create(gold()).await.unwrap();
    let err = catalog
        .update(
            plan.id,
            PlanPatch {
                duration: Some(20_000),
                price: Some(dec!(99999999.99)),
                ..PlanPatch::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GymError::Validation(_)));
    assert_eq!(catalog.get(plan.id).await.unwrap().duration, 3);
}

#[tokio::test]
async fn test_expensive_long_plan_still_enrolls() {
    let (store, catalog) = setup();
    let repo = Arc::new(store.clone());
    let enrollments = EnrollmentService::new(
        Arc::clone(&repo),
        Arc::clone(&repo),
        repo,
        Arc::new(RecordingNotifier::new()),
    );
    let plan = catalog
        .create(NewPlan {
            title: "Decade".to_string(),
            duration: 120,
            price: dec!(999999.99),
        })
        .await
        .unwrap();
    let student = store.insert_student("Ana Souza", "ana@example.com");

    let enrollment = enrollments
        .enroll(NewEnrollment {
            student_id: student,
            plan_id: plan.id.0,
            start_date: "2023-01-01".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(enrollment.price, dec!(119999998.80));
}
