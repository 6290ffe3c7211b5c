pub mod schedule;

pub use schedule::{PaymentSchedule, PaymentScheduleItem};
