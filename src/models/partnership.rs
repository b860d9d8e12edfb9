use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Franchise partner inquiry. Investment brackets and call windows keep
/// their display strings; validation checks them against the tables below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partnership {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub pincode: String,
    pub investment_capacity: String,
    pub business_experience: String,
    pub preferred_location: String,
    pub comments: String,
    pub call_schedule: String,
    pub status: PartnershipStatus,
    pub submitted_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub const INVESTMENT_CAPACITIES: &[&str] = &[
    "₹0-2 Lakhs",
    "₹2-5 Lakhs",
    "₹5-10 Lakhs",
    "₹10-15 Lakhs",
    "₹15-20 Lakhs",
    "₹20-30 Lakhs",
    "₹30+ Lakhs",
];

pub const CALL_SCHEDULES: &[&str] = &[
    "Morning (9AM-12PM)",
    "Afternoon (12PM-4PM)",
    "Evening (4PM-7PM)",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PartnershipStatus {
    Pending,
    Contacted,
    Approved,
    Rejected,
}

impl PartnershipStatus {
    pub const ALL: &'static [&'static str] = &["pending", "contacted", "approved", "rejected"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartnershipStatus::Pending => "pending",
            PartnershipStatus::Contacted => "contacted",
            PartnershipStatus::Approved => "approved",
            PartnershipStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PartnershipStatus::Pending),
            "contacted" => Some(PartnershipStatus::Contacted),
            "approved" => Some(PartnershipStatus::Approved),
            "rejected" => Some(PartnershipStatus::Rejected),
            _ => None,
        }
    }
}
