use super::*;

#[tokio::test]
async fn food_settlement_decrements_inventory() {
    let f = fixture();
    seed_food_item(&f, "food_item:pizza", Some(3));
    f.orders.insert(food_order("o1", "food_item:pizza", 2));

    let report = f.coordinator.handle_payment_result("order:o1", true).await;

    assert_eq!(report.outcome, SettlementOutcome::Settled);
    assert!(report.failures.is_empty());
    assert_eq!(f.catalog.stock("food_item:pizza"), Some(1));

    let order = f.orders.get("order:o1").unwrap();
    assert!(order.payment);
    assert_eq!(order.status, OrderStatus::Settled);
}

#[tokio::test]
async fn inventory_floors_at_zero() {
    let f = fixture();
    seed_food_item(&f, "food_item:pizza", Some(1));
    f.orders.insert(food_order("o1", "food_item:pizza", 5));

    let report = f.coordinator.handle_payment_result("order:o1", true).await;

    assert_eq!(report.outcome, SettlementOutcome::Settled);
    assert_eq!(f.catalog.stock("food_item:pizza"), Some(0));
}

#[tokio::test]
async fn unconstrained_inventory_left_untouched() {
    let f = fixture();
    seed_food_item(&f, "food_item:pizza", None);
    f.orders.insert(food_order("o1", "food_item:pizza", 5));

    let report = f.coordinator.handle_payment_result("order:o1", true).await;

    assert_eq!(report.outcome, SettlementOutcome::Settled);
    assert_eq!(f.catalog.stock("food_item:pizza"), None);
}

#[tokio::test]
async fn course_settlement_creates_enrollment_and_bumps_counter() {
    let f = fixture();
    seed_course(&f, "course:rust101");
    f.orders.insert(course_order("o1", "course:rust101"));

    let report = f.coordinator.handle_payment_result("order:o1", true).await;

    assert_eq!(report.outcome, SettlementOutcome::Settled);
    assert_eq!(f.enrollments.count_for("user:alice", "course:rust101"), 1);
    assert_eq!(f.courses.enrolled("course:rust101"), 1);

    // Payment snapshot is captured on the enrollment
    let enrollments = f.enrollments.enrollments.lock().unwrap();
    let payment = enrollments[0].payment.as_ref().unwrap();
    assert_eq!(payment.order_id, "order:o1");
    assert_eq!(payment.amount_paid, 49.0);
}

#[tokio::test]
async fn existing_enrollment_skips_create_and_counter() {
    let f = fixture();
    seed_course(&f, "course:rust101");

    // Alice is already enrolled from a previous purchase
    f.orders.insert(course_order("o1", "course:rust101"));
    f.coordinator.handle_payment_result("order:o1", true).await;
    f.orders.insert(course_order("o2", "course:rust101"));

    let report = f.coordinator.handle_payment_result("order:o2", true).await;

    assert_eq!(report.outcome, SettlementOutcome::Settled);
    assert_eq!(f.enrollments.count_for("user:alice", "course:rust101"), 1);
    assert_eq!(f.courses.enrolled("course:rust101"), 1);
}

#[tokio::test]
async fn side_effect_failure_never_rolls_back_payment() {
    let f = fixture();
    seed_course(&f, "course:rust101");
    *f.enrollments.fail_create.lock().unwrap() = true;
    f.orders.insert(course_order("o1", "course:rust101"));

    let report = f.coordinator.handle_payment_result("order:o1", true).await;

    assert_eq!(report.outcome, SettlementOutcome::Settled);
    assert_eq!(report.failures.len(), 1);

    // The payment stands even though the enrollment write failed
    let order = f.orders.get("order:o1").unwrap();
    assert!(order.payment);
    assert_eq!(f.courses.enrolled("course:rust101"), 0);
}

#[tokio::test]
async fn unknown_order_reports_not_found() {
    let f = fixture();
    let report = f.coordinator.handle_payment_result("order:ghost", true).await;
    assert_eq!(report.outcome, SettlementOutcome::NotFound);
}
