pub mod admin;
pub mod booking;
pub mod partnership;

pub use admin::Admin;
pub use booking::{Booking, BookingStatus, CarType, DeviceType, ServiceType};
pub use partnership::{Partnership, PartnershipStatus, CALL_SCHEDULES, INVESTMENT_CAPACITIES};
