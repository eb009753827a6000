use super::*;

#[tokio::test]
async fn duplicate_callback_decrements_inventory_once() {
    let f = fixture();
    seed_food_item(&f, "food_item:pizza", Some(3));
    f.orders.insert(food_order("o1", "food_item:pizza", 2));

    let first = f.coordinator.handle_payment_result("order:o1", true).await;
    let second = f.coordinator.handle_payment_result("order:o1", true).await;

    assert_eq!(first.outcome, SettlementOutcome::Settled);
    assert_eq!(second.outcome, SettlementOutcome::AlreadySettled);
    // 3 - 2 = 1 and it stays 1 after the replay
    assert_eq!(f.catalog.stock("food_item:pizza"), Some(1));
}

#[tokio::test]
async fn duplicate_callback_enrolls_once() {
    let f = fixture();
    seed_course(&f, "course:rust101");
    f.orders.insert(course_order("o1", "course:rust101"));

    f.coordinator.handle_payment_result("order:o1", true).await;
    let replay = f.coordinator.handle_payment_result("order:o1", true).await;

    assert_eq!(replay.outcome, SettlementOutcome::AlreadySettled);
    assert_eq!(f.enrollments.count_for("user:alice", "course:rust101"), 1);
    assert_eq!(f.courses.enrolled("course:rust101"), 1);
}

#[tokio::test]
async fn duplicate_callback_records_promo_usage_once() {
    let f = fixture();
    seed_food_item(&f, "food_item:pizza", Some(10));
    let mut order = food_order("o1", "food_item:pizza", 1);
    order.promo_code = Some("save10".to_string());
    order.promo_id = Some("promo:save10".to_string());
    f.orders.insert(order);

    f.coordinator.handle_payment_result("order:o1", true).await;
    f.coordinator.handle_payment_result("order:o1", true).await;

    assert_eq!(f.ledger.count(), 1);
}

#[tokio::test]
async fn failure_after_success_does_not_delete_paid_order() {
    let f = fixture();
    seed_food_item(&f, "food_item:pizza", Some(3));
    f.orders.insert(food_order("o1", "food_item:pizza", 1));

    f.coordinator.handle_payment_result("order:o1", true).await;
    let stale = f.coordinator.handle_payment_result("order:o1", false).await;

    assert_eq!(stale.outcome, SettlementOutcome::AlreadySettled);
    assert!(f.orders.get("order:o1").is_some());
}
