pub mod company;
pub mod employee;
pub mod time_entry;
