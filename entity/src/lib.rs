pub mod attendance_records;
pub mod employees;
pub mod overtime_requests;
pub mod shift_days;
