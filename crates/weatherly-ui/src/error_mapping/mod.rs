//! Maps UI service errors to weatherly_core::AppError for consistent user-facing messages.

mod weather;
