//! Notification builders for the e-mail templates

use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

use gympoint_types::{EnrollmentTerms, HelpOrder, Plan, Student};

use crate::notifier::Notification;

/// Template confirming a new enrollment
pub const ENROLLMENT_TEMPLATE: &str = "enrollment";

/// Template delivering a staff answer
pub const HELP_ORDER_ANSWER_TEMPLATE: &str = "help_order_answer";

const DATE_FORMAT: &str = "%m/%d/%Y";

/// Money with exactly two decimals, e.g. `300.00`
pub fn format_price(price: Decimal) -> String {
    format!("{:.2}", price.round_dp(2))
}

/// Enrollment confirmation sent to the student
pub fn enrollment_confirmation(
    student: &Student,
    plan: &Plan,
    terms: &EnrollmentTerms,
) -> Notification {
    Notification {
        to: student.mailbox(),
        subject: format!("Gympoint - {} Plan Enrollment", plan.title),
        template: ENROLLMENT_TEMPLATE.to_string(),
        context: object(json!({
            "studentName": student.name,
            "totalMonths": plan.duration,
            "planTitle": plan.title,
            "startDate": terms.start_date.format(DATE_FORMAT).to_string(),
            "endDate": terms.end_date.format(DATE_FORMAT).to_string(),
            "price": format_price(terms.price),
        })),
    }
}

/// Answer notification sent to the student who asked
pub fn help_order_answered(student: &Student, order: &HelpOrder) -> Notification {
    Notification {
        to: student.mailbox(),
        subject: "Gympoint - Your question has been answered".to_string(),
        template: HELP_ORDER_ANSWER_TEMPLATE.to_string(),
        context: object(json!({
            "studentName": student.name,
            "question": order.question,
            "answer": order.answer,
        })),
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
