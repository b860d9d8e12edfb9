use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub car_type: CarType,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    pub address: String,
    pub notes: String,
    pub device_type: DeviceType,
    pub status: BookingStatus,
    pub submitted_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CarType {
    Sedan,
    Suv,
    Hatchback,
    Luxury,
}

impl CarType {
    pub const ALL: &'static [&'static str] = &["sedan", "suv", "hatchback", "luxury"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarType::Sedan => "sedan",
            CarType::Suv => "suv",
            CarType::Hatchback => "hatchback",
            CarType::Luxury => "luxury",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sedan" => Some(CarType::Sedan),
            "suv" => Some(CarType::Suv),
            "hatchback" => Some(CarType::Hatchback),
            "luxury" => Some(CarType::Luxury),
            _ => None,
        }
    }
}

/// The nine fixed wash-plan codes sold by the business.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    DailyMagic,
    DailyMagicLuxe,
    DailyMagicRoyal,
    WeeklyMagic,
    WeeklyMagicLuxe,
    WeeklyMagicRoyal,
    AlternateMagic,
    AlternateMagicLuxe,
    AlternateMagicRoyal,
}

impl ServiceType {
    pub const ALL: &'static [&'static str] = &[
        "daily-magic",
        "daily-magic-luxe",
        "daily-magic-royal",
        "weekly-magic",
        "weekly-magic-luxe",
        "weekly-magic-royal",
        "alternate-magic",
        "alternate-magic-luxe",
        "alternate-magic-royal",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::DailyMagic => "daily-magic",
            ServiceType::DailyMagicLuxe => "daily-magic-luxe",
            ServiceType::DailyMagicRoyal => "daily-magic-royal",
            ServiceType::WeeklyMagic => "weekly-magic",
            ServiceType::WeeklyMagicLuxe => "weekly-magic-luxe",
            ServiceType::WeeklyMagicRoyal => "weekly-magic-royal",
            ServiceType::AlternateMagic => "alternate-magic",
            ServiceType::AlternateMagicLuxe => "alternate-magic-luxe",
            ServiceType::AlternateMagicRoyal => "alternate-magic-royal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily-magic" => Some(ServiceType::DailyMagic),
            "daily-magic-luxe" => Some(ServiceType::DailyMagicLuxe),
            "daily-magic-royal" => Some(ServiceType::DailyMagicRoyal),
            "weekly-magic" => Some(ServiceType::WeeklyMagic),
            "weekly-magic-luxe" => Some(ServiceType::WeeklyMagicLuxe),
            "weekly-magic-royal" => Some(ServiceType::WeeklyMagicRoyal),
            "alternate-magic" => Some(ServiceType::AlternateMagic),
            "alternate-magic-luxe" => Some(ServiceType::AlternateMagicLuxe),
            "alternate-magic-royal" => Some(ServiceType::AlternateMagicRoyal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Ios,
    Android,
    Other,
}

impl DeviceType {
    pub const ALL: &'static [&'static str] = &["ios", "android", "other"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Ios => "ios",
            DeviceType::Android => "android",
            DeviceType::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ios" => Some(DeviceType::Ios),
            "android" => Some(DeviceType::Android),
            "other" => Some(DeviceType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: &'static [&'static str] = &["pending", "confirmed", "completed", "cancelled"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}
