use super::*;
use crate::db::models::{Course, FoodItem, OrderItem, OrderStatus, User, UserRole};
use crate::services::NotificationSender;
use crate::utils::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use surrealdb::sql::Thing;

mod test_idempotency;
mod test_settlement;

// ========================================================================
// In-memory fakes
// ========================================================================

#[derive(Default)]
struct FakeOrderStore {
    orders: Mutex<HashMap<String, Order>>,
    /// Flip the order to paid at the start of `delete_if_unpaid`,
    /// simulating a success callback's CAS landing just before the
    /// delete statement runs.
    pay_before_delete: Mutex<bool>,
}

impl FakeOrderStore {
    fn insert(&self, order: Order) {
        let id = order.id_string();
        self.orders.lock().unwrap().insert(id, order);
    }

    fn get(&self, id: &str) -> Option<Order> {
        self.orders.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl OrderStore for FakeOrderStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>> {
        Ok(self.get(id))
    }

    async fn mark_paid_if_pending(&self, id: &str) -> AppResult<Option<Order>> {
        let mut orders = self.orders.lock().unwrap();
        match orders.get_mut(id) {
            Some(order) if !order.payment => {
                order.payment = true;
                order.status = OrderStatus::Paid;
                Ok(Some(order.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn mark_settled(&self, id: &str) -> AppResult<()> {
        if let Some(order) = self.orders.lock().unwrap().get_mut(id) {
            order.status = OrderStatus::Settled;
        }
        Ok(())
    }

    async fn delete_if_unpaid(&self, id: &str) -> AppResult<Option<Order>> {
        let mut orders = self.orders.lock().unwrap();
        if *self.pay_before_delete.lock().unwrap()
            && let Some(order) = orders.get_mut(id)
        {
            order.payment = true;
            order.status = OrderStatus::Paid;
        }
        match orders.get(id) {
            Some(order) if !order.payment => Ok(orders.remove(id)),
            _ => Ok(None),
        }
    }
}

#[derive(Default)]
struct FakeCatalog {
    items: Mutex<HashMap<String, FoodItem>>,
}

impl FakeCatalog {
    fn stock(&self, id: &str) -> Option<i64> {
        self.items
            .lock()
            .unwrap()
            .get(id)
            .and_then(|i| i.available_quantity)
    }
}

#[async_trait]
impl CatalogStore for FakeCatalog {
    async fn decrement_quantity(&self, item_id: &str, quantity: i64) -> AppResult<()> {
        if let Some(item) = self.items.lock().unwrap().get_mut(item_id)
            && let Some(available) = item.available_quantity
        {
            item.available_quantity = Some((available - quantity).max(0));
        }
        Ok(())
    }
}

#[derive(Default)]
struct FakeCourses {
    courses: Mutex<HashMap<String, Course>>,
}

impl FakeCourses {
    fn enrolled(&self, id: &str) -> i64 {
        self.courses
            .lock()
            .unwrap()
            .get(id)
            .map(|c| c.enrolled_students)
            .unwrap_or(0)
    }
}

#[async_trait]
impl CourseStore for FakeCourses {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        Ok(self.courses.lock().unwrap().get(id).cloned())
    }

    async fn increment_enrollment(&self, course_id: &str) -> AppResult<()> {
        if let Some(course) = self.courses.lock().unwrap().get_mut(course_id) {
            course.enrolled_students += 1;
        }
        Ok(())
    }
}

#[derive(Default)]
struct FakeEnrollments {
    enrollments: Mutex<Vec<Enrollment>>,
    fail_create: Mutex<bool>,
}

impl FakeEnrollments {
    fn count_for(&self, student_id: &str, course_id: &str) -> usize {
        self.enrollments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.student_id == student_id && e.course_id == course_id)
            .count()
    }
}

#[async_trait]
impl EnrollmentStore for FakeEnrollments {
    async fn find_by_student_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<Enrollment>> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned())
    }

    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment> {
        if *self.fail_create.lock().unwrap() {
            return Err(AppError::database("enrollment write failed"));
        }
        let mut stored = enrollment.clone();
        stored.id = Some(Thing::from(("enrollment", "e1")));
        self.enrollments.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}

#[derive(Default)]
struct FakeLedger {
    usages: Mutex<Vec<(String, String)>>,
}

impl FakeLedger {
    fn count(&self) -> usize {
        self.usages.lock().unwrap().len()
    }
}

#[async_trait]
impl PromoUsageLedger for FakeLedger {
    async fn record_usage(&self, promo_id: &str, user_id: &str) -> AppResult<()> {
        self.usages
            .lock()
            .unwrap()
            .push((promo_id.to_string(), user_id.to_string()));
        Ok(())
    }
}

#[derive(Default)]
struct FakeUsers {
    users: Mutex<HashMap<String, User>>,
}

impl FakeUsers {
    fn add(&self, id: &str, role: UserRole) {
        self.users.lock().unwrap().insert(
            id.to_string(),
            User {
                id: None,
                email: format!("{id}@example.com"),
                role,
            },
        );
    }
}

#[async_trait]
impl UserDirectory for FakeUsers {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }
}

struct SilentNotifier;

#[async_trait]
impl NotificationSender for SilentNotifier {
    async fn order_confirmed(&self, _order: &Order) {}
    async fn enrollment_created(&self, _student_id: &str, _course_id: &str) {}
}

// ========================================================================
// Fixture
// ========================================================================

struct Fixture {
    orders: Arc<FakeOrderStore>,
    catalog: Arc<FakeCatalog>,
    courses: Arc<FakeCourses>,
    enrollments: Arc<FakeEnrollments>,
    ledger: Arc<FakeLedger>,
    users: Arc<FakeUsers>,
    coordinator: SettlementCoordinator,
}

fn fixture() -> Fixture {
    let orders = Arc::new(FakeOrderStore::default());
    let catalog = Arc::new(FakeCatalog::default());
    let courses = Arc::new(FakeCourses::default());
    let enrollments = Arc::new(FakeEnrollments::default());
    let ledger = Arc::new(FakeLedger::default());
    let users = Arc::new(FakeUsers::default());

    let coordinator = SettlementCoordinator::new(
        Arc::clone(&orders) as Arc<dyn OrderStore>,
        Arc::clone(&catalog) as Arc<dyn CatalogStore>,
        Arc::clone(&courses) as Arc<dyn CourseStore>,
        Arc::clone(&enrollments) as Arc<dyn EnrollmentStore>,
        Arc::clone(&ledger) as Arc<dyn PromoUsageLedger>,
        Arc::clone(&users) as Arc<dyn UserDirectory>,
        Arc::new(SilentNotifier),
    );

    Fixture {
        orders,
        catalog,
        courses,
        enrollments,
        ledger,
        users,
        coordinator,
    }
}

fn food_order(id: &str, item_id: &str, quantity: i64) -> Order {
    Order {
        id: Some(Thing::from(("order", id))),
        user_id: "user:alice".to_string(),
        items: vec![OrderItem {
            item_id: item_id.to_string(),
            name: "Margherita".to_string(),
            quantity,
            unit_price: 9.5,
            course_id: None,
        }],
        subtotal: 9.5 * quantity as f64,
        delivery_fee: 0.0,
        discount: 0.0,
        amount: 9.5 * quantity as f64,
        promo_code: None,
        promo_id: None,
        status: OrderStatus::PendingPayment,
        payment: false,
        order_type: OrderType::Food,
        created_at: 0,
    }
}

fn course_order(id: &str, course_id: &str) -> Order {
    Order {
        id: Some(Thing::from(("order", id))),
        user_id: "user:alice".to_string(),
        items: vec![OrderItem {
            item_id: course_id.to_string(),
            name: "Rust 101".to_string(),
            quantity: 1,
            unit_price: 49.0,
            course_id: Some(course_id.to_string()),
        }],
        subtotal: 49.0,
        delivery_fee: 0.0,
        discount: 0.0,
        amount: 49.0,
        promo_code: None,
        promo_id: None,
        status: OrderStatus::PendingPayment,
        payment: false,
        order_type: OrderType::Course,
        created_at: 0,
    }
}

fn seed_food_item(fixture: &Fixture, id: &str, quantity: Option<i64>) {
    fixture.catalog.items.lock().unwrap().insert(
        id.to_string(),
        FoodItem {
            id: None,
            name: "Margherita".to_string(),
            price: 9.5,
            available_quantity: quantity,
            is_active: true,
        },
    );
}

fn seed_course(fixture: &Fixture, id: &str) {
    fixture.courses.courses.lock().unwrap().insert(
        id.to_string(),
        Course {
            id: None,
            title: "Rust 101".to_string(),
            price: 49.0,
            enrolled_students: 0,
            total_sections: 10,
            total_quizzes: 0,
            total_classes: 0,
            completion_requirements: vec![],
            is_active: true,
        },
    );
}
