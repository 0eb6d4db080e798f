//! In-memory repositories for testing

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use gympoint_db::{
    CheckinAdmission, CheckinRepository, CheckinRow, DbError, DbResult, EnrollmentRepository,
    EnrollmentRow, HelpOrderRepository, HelpOrderRow, PendingHelpOrderRow, PlanRepository,
    PlanRow, StudentRepository, StudentRow, WriteEnrollment, WritePlan,
};
use rust_decimal::Decimal;

/// In-memory database implementing every repository trait
#[derive(Default, Clone)]
pub struct MockStore {
    next_id: Arc<AtomicI64>,
    students: Arc<DashMap<i64, StudentRow>>,
    plans: Arc<DashMap<i64, PlanRow>>,
    enrollments: Arc<DashMap<i64, EnrollmentRow>>,
    checkins: Arc<DashMap<i64, CheckinRow>>,
    help_orders: Arc<DashMap<i64, HelpOrderRow>>,
    admission: Arc<Mutex<()>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Insert a test student directly
    pub fn insert_student(&self, name: &str, email: &str) -> i64 {
        let id = self.next_id();
        self.students.insert(
            id,
            StudentRow {
                id,
                name: name.to_string(),
                email: email.to_string(),
            },
        );
        id
    }

    /// Insert a test plan directly
    pub fn insert_plan(&self, title: &str, duration: i32, price: Decimal) -> i64 {
        let id = self.next_id();
        let now = Utc::now();
        self.plans.insert(
            id,
            PlanRow {
                id,
                title: title.to_string(),
                duration,
                price,
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    /// Insert a check-in with an explicit timestamp
    pub fn insert_checkin(&self, student_id: i64, created_at: DateTime<Utc>) -> i64 {
        let id = self.next_id();
        self.checkins.insert(
            id,
            CheckinRow {
                id,
                student_id,
                created_at,
            },
        );
        id
    }

    /// Number of stored check-ins for a student
    #[allow(dead_code)]
    pub fn checkin_count(&self, student_id: i64) -> usize {
        self.checkins
            .iter()
            .filter(|c| c.student_id == student_id)
            .count()
    }

    /// Number of stored enrollments
    #[allow(dead_code)]
    pub fn enrollment_count(&self) -> usize {
        self.enrollments.len()
    }
}

fn sorted<T: Clone>(map: &DashMap<i64, T>, keep: impl Fn(&T) -> bool) -> Vec<T> {
    let mut rows: Vec<(i64, T)> = map
        .iter()
        .filter(|r| keep(r.value()))
        .map(|r| (*r.key(), r.value().clone()))
        .collect();
    rows.sort_by_key(|(id, _)| *id);
    rows.into_iter().map(|(_, row)| row).collect()
}

#[async_trait]
impl StudentRepository for MockStore {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<StudentRow>> {
        Ok(self.students.get(&id).map(|r| r.value().clone()))
    }
}

#[async_trait]
impl PlanRepository for MockStore {
    async fn list(&self) -> DbResult<Vec<PlanRow>> {
        Ok(sorted(&self.plans, |_| true))
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<PlanRow>> {
        Ok(self.plans.get(&id).map(|r| r.value().clone()))
    }

    async fn create(&self, plan: WritePlan) -> DbResult<PlanRow> {
        let id = self.insert_plan(&plan.title, plan.duration, plan.price);
        Ok(self.plans.get(&id).map(|r| r.value().clone()).unwrap())
    }

    async fn update(&self, id: i64, plan: WritePlan) -> DbResult<PlanRow> {
        let mut row = self.plans.get_mut(&id).ok_or(DbError::NotFound)?;
        row.title = plan.title;
        row.duration = plan.duration;
        row.price = plan.price;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        if self.enrollments.iter().any(|e| e.plan_id == id) {
            return Err(DbError::StillReferenced("enrollments".to_string()));
        }
        self.plans.remove(&id).map(|_| ()).ok_or(DbError::NotFound)
    }
}

#[async_trait]
impl EnrollmentRepository for MockStore {
    async fn list(&self) -> DbResult<Vec<EnrollmentRow>> {
        Ok(sorted(&self.enrollments, |_| true))
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<EnrollmentRow>> {
        Ok(self.enrollments.get(&id).map(|r| r.value().clone()))
    }

    async fn create(&self, enrollment: WriteEnrollment) -> DbResult<EnrollmentRow> {
        let id = self.next_id();
        let now = Utc::now();
        let row = EnrollmentRow {
            id,
            student_id: enrollment.student_id,
            plan_id: enrollment.plan_id,
            start_date: enrollment.start_date,
            end_date: enrollment.end_date,
            price: enrollment.price,
            created_at: now,
            updated_at: now,
        };
        self.enrollments.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, enrollment: WriteEnrollment) -> DbResult<EnrollmentRow> {
        let mut row = self.enrollments.get_mut(&id).ok_or(DbError::NotFound)?;
        row.student_id = enrollment.student_id;
        row.plan_id = enrollment.plan_id;
        row.start_date = enrollment.start_date;
        row.end_date = enrollment.end_date;
        row.price = enrollment.price;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        self.enrollments
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound)
    }
}

#[async_trait]
impl CheckinRepository for MockStore {
    async fn find_by_student_id(&self, student_id: i64) -> DbResult<Vec<CheckinRow>> {
        Ok(sorted(&self.checkins, |c| c.student_id == student_id))
    }

    async fn admit(
        &self,
        student_id: i64,
        window_start: DateTime<Utc>,
        limit: i64,
        now: DateTime<Utc>,
    ) -> DbResult<CheckinAdmission> {
        let _guard = self.admission.lock().unwrap();

        if !self.students.contains_key(&student_id) {
            return Err(DbError::NotFound);
        }

        let recent = self
            .checkins
            .iter()
            .filter(|c| c.student_id == student_id && c.created_at >= window_start)
            .count() as i64;

        if recent >= limit {
            return Ok(CheckinAdmission::Rejected { recent });
        }

        let id = self.insert_checkin(student_id, now);
        let row = self.checkins.get(&id).map(|r| r.value().clone()).unwrap();
        Ok(CheckinAdmission::Admitted(row))
    }
}

#[async_trait]
impl HelpOrderRepository for MockStore {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<HelpOrderRow>> {
        Ok(self.help_orders.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_student_id(&self, student_id: i64) -> DbResult<Vec<HelpOrderRow>> {
        Ok(sorted(&self.help_orders, |h| h.student_id == student_id))
    }

    async fn find_unanswered(&self) -> DbResult<Vec<PendingHelpOrderRow>> {
        let rows = sorted(&self.help_orders, |h| h.answer_at.is_none())
            .into_iter()
            .filter_map(|h| {
                self.students.get(&h.student_id).map(|s| PendingHelpOrderRow {
                    id: h.id,
                    question: h.question.clone(),
                    created_at: h.created_at,
                    student_id: s.id,
                    student_name: s.name.clone(),
                })
            })
            .collect();
        Ok(rows)
    }

    async fn create(&self, student_id: i64, question: &str) -> DbResult<HelpOrderRow> {
        let id = self.next_id();
        let now = Utc::now();
        let row = HelpOrderRow {
            id,
            student_id,
            question: question.to_string(),
            answer: None,
            answer_at: None,
            created_at: now,
            updated_at: now,
        };
        self.help_orders.insert(id, row.clone());
        Ok(row)
    }

    async fn answer(
        &self,
        id: i64,
        answer: &str,
        answered_at: DateTime<Utc>,
    ) -> DbResult<Option<HelpOrderRow>> {
        let Some(mut row) = self.help_orders.get_mut(&id) else {
            return Ok(None);
        };
        if row.answer_at.is_some() {
            return Ok(None);
        }
        row.answer = Some(answer.to_string());
        row.answer_at = Some(answered_at);
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }
}
