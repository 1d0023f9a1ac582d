pub mod emi;
pub mod schedule;

pub use emi::emi_amount;
pub use schedule::{upcoming_payments, upcoming_payments_now, UpcomingPayment, DEFAULT_WINDOW_DAYS};
