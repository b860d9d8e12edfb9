use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Admin, Booking, BookingStatus, CarType, DeviceType, Partnership, PartnershipStatus, ServiceType};

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FMT: &str = "%Y-%m-%d";

fn fmt_dt(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}

fn parse_dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT).unwrap_or_else(|_| Utc::now().naive_utc())
}

// ── Bookings ──

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, name, email, phone, car_type, service_type, date, address, notes, device_type, status, submitted_at, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            booking.id,
            booking.name,
            booking.email,
            booking.phone,
            booking.car_type.as_str(),
            booking.service_type.as_str(),
            booking.date.format(DATE_FMT).to_string(),
            booking.address,
            booking.notes,
            booking.device_type.as_str(),
            booking.status.as_str(),
            fmt_dt(&booking.submitted_at),
            fmt_dt(&booking.created_at),
            fmt_dt(&booking.updated_at),
        ],
    )?;
    Ok(())
}

const BOOKING_COLUMNS: &str =
    "id, name, email, phone, car_type, service_type, date, address, notes, device_type, status, submitted_at, created_at, updated_at";

pub fn list_bookings(
    conn: &Connection,
    status_filter: Option<&str>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Booking>> {
    let (sql, params_vec): (String, Vec<Box<dyn rusqlite::types::ToSql>>) = match status_filter {
        Some(status) => (
            format!(
                "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = ?1 \
                 ORDER BY submitted_at DESC LIMIT ?2 OFFSET ?3"
            ),
            vec![
                Box::new(status.to_string()) as Box<dyn rusqlite::types::ToSql>,
                Box::new(limit),
                Box::new(offset),
            ],
        ),
        None => (
            format!(
                "SELECT {BOOKING_COLUMNS} FROM bookings \
                 ORDER BY submitted_at DESC LIMIT ?1 OFFSET ?2"
            ),
            vec![
                Box::new(limit) as Box<dyn rusqlite::types::ToSql>,
                Box::new(offset),
            ],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn count_bookings(conn: &Connection, status_filter: Option<&str>) -> anyhow::Result<i64> {
    let count: i64 = match status_filter {
        Some(status) => conn.query_row(
            "SELECT COUNT(*) FROM bookings WHERE status = ?1",
            params![status],
            |row| row.get(0),
        )?,
        None => conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?,
    };
    Ok(count)
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: &BookingStatus,
) -> anyhow::Result<bool> {
    let now = fmt_dt(&Utc::now().naive_utc());
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )?;
    Ok(count > 0)
}

pub fn delete_booking(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let email: String = row.get(2)?;
    let phone: String = row.get(3)?;
    let car_type_str: String = row.get(4)?;
    let service_type_str: String = row.get(5)?;
    let date_str: String = row.get(6)?;
    let address: String = row.get(7)?;
    let notes: String = row.get(8)?;
    let device_type_str: String = row.get(9)?;
    let status_str: String = row.get(10)?;
    let submitted_at_str: String = row.get(11)?;
    let created_at_str: String = row.get(12)?;
    let updated_at_str: String = row.get(13)?;

    let car_type = CarType::parse(&car_type_str)
        .ok_or_else(|| anyhow::anyhow!("unknown car type: {car_type_str}"))?;
    let service_type = ServiceType::parse(&service_type_str)
        .ok_or_else(|| anyhow::anyhow!("unknown service type: {service_type_str}"))?;
    let device_type = DeviceType::parse(&device_type_str).unwrap_or(DeviceType::Other);
    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT)
        .unwrap_or_else(|_| Utc::now().date_naive());

    Ok(Booking {
        id,
        name,
        email,
        phone,
        car_type,
        service_type,
        date,
        address,
        notes,
        device_type,
        status: BookingStatus::parse(&status_str).unwrap_or(BookingStatus::Pending),
        submitted_at: parse_dt(&submitted_at_str),
        created_at: parse_dt(&created_at_str),
        updated_at: parse_dt(&updated_at_str),
    })
}

// ── Partnerships ──

pub fn create_partnership(conn: &Connection, p: &Partnership) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO partnerships (id, full_name, email, phone, city, pincode, investment_capacity, business_experience, preferred_location, comments, call_schedule, status, submitted_at, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            p.id,
            p.full_name,
            p.email,
            p.phone,
            p.city,
            p.pincode,
            p.investment_capacity,
            p.business_experience,
            p.preferred_location,
            p.comments,
            p.call_schedule,
            p.status.as_str(),
            fmt_dt(&p.submitted_at),
            fmt_dt(&p.created_at),
            fmt_dt(&p.updated_at),
        ],
    )?;
    Ok(())
}

const PARTNERSHIP_COLUMNS: &str =
    "id, full_name, email, phone, city, pincode, investment_capacity, business_experience, preferred_location, comments, call_schedule, status, submitted_at, created_at, updated_at";

fn partnership_filter(
    status_filter: Option<&str>,
    city_filter: Option<&str>,
) -> (String, Vec<Box<dyn rusqlite::types::ToSql>>) {
    let mut clauses: Vec<&str> = vec![];
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = vec![];

    if let Some(status) = status_filter {
        clauses.push("status = ?");
        params_vec.push(Box::new(status.to_string()));
    }
    if let Some(city) = city_filter {
        // Case-insensitive substring match on city.
        clauses.push("instr(lower(city), lower(?)) > 0");
        params_vec.push(Box::new(city.to_string()));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    (where_sql, params_vec)
}

pub fn list_partnerships(
    conn: &Connection,
    status_filter: Option<&str>,
    city_filter: Option<&str>,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Partnership>> {
    let (where_sql, mut params_vec) = partnership_filter(status_filter, city_filter);
    params_vec.push(Box::new(limit));
    params_vec.push(Box::new(offset));

    let sql = format!(
        "SELECT {PARTNERSHIP_COLUMNS} FROM partnerships{where_sql} \
         ORDER BY submitted_at DESC LIMIT ? OFFSET ?"
    );

    let mut stmt = conn.prepare(&sql)?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_partnership_row(row)))?;

    let mut partnerships = vec![];
    for row in rows {
        partnerships.push(row??);
    }
    Ok(partnerships)
}

pub fn count_partnerships(
    conn: &Connection,
    status_filter: Option<&str>,
    city_filter: Option<&str>,
) -> anyhow::Result<i64> {
    let (where_sql, params_vec) = partnership_filter(status_filter, city_filter);
    let sql = format!("SELECT COUNT(*) FROM partnerships{where_sql}");

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let count: i64 = conn.query_row(&sql, params_refs.as_slice(), |row| row.get(0))?;
    Ok(count)
}

pub fn get_partnership_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Partnership>> {
    let result = conn.query_row(
        &format!("SELECT {PARTNERSHIP_COLUMNS} FROM partnerships WHERE id = ?1"),
        params![id],
        |row| Ok(parse_partnership_row(row)),
    );

    match result {
        Ok(p) => Ok(Some(p?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_partnership_status(
    conn: &Connection,
    id: &str,
    status: &PartnershipStatus,
) -> anyhow::Result<bool> {
    let now = fmt_dt(&Utc::now().naive_utc());
    let count = conn.execute(
        "UPDATE partnerships SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )?;
    Ok(count > 0)
}

pub fn delete_partnership(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM partnerships WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_partnership_row(row: &rusqlite::Row) -> anyhow::Result<Partnership> {
    let status_str: String = row.get(11)?;
    let submitted_at_str: String = row.get(12)?;
    let created_at_str: String = row.get(13)?;
    let updated_at_str: String = row.get(14)?;

    Ok(Partnership {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        city: row.get(4)?,
        pincode: row.get(5)?,
        investment_capacity: row.get(6)?,
        business_experience: row.get(7)?,
        preferred_location: row.get(8)?,
        comments: row.get(9)?,
        call_schedule: row.get(10)?,
        status: PartnershipStatus::parse(&status_str).unwrap_or(PartnershipStatus::Pending),
        submitted_at: parse_dt(&submitted_at_str),
        created_at: parse_dt(&created_at_str),
        updated_at: parse_dt(&updated_at_str),
    })
}

// ── Admins ──

const ADMIN_COLUMNS: &str =
    "id, username, password_hash, email, role, login_attempts, lock_until, last_login, created_at";

pub fn insert_admin(conn: &Connection, admin: &Admin) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO admins (id, username, password_hash, email, role, login_attempts, lock_until, last_login, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            admin.id,
            admin.username,
            admin.password_hash,
            admin.email,
            admin.role,
            admin.login_attempts,
            admin.lock_until.as_ref().map(fmt_dt),
            admin.last_login.as_ref().map(fmt_dt),
            fmt_dt(&admin.created_at),
        ],
    )?;
    Ok(())
}

pub fn get_admin_by_username(conn: &Connection, username: &str) -> anyhow::Result<Option<Admin>> {
    let result = conn.query_row(
        &format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE username = ?1"),
        params![username],
        parse_admin_row,
    );

    match result {
        Ok(admin) => Ok(Some(admin)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_admin_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Admin>> {
    let result = conn.query_row(
        &format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = ?1"),
        params![id],
        parse_admin_row,
    );

    match result {
        Ok(admin) => Ok(Some(admin)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Record a failed attempt: the caller computes the new counter value and
/// whether the account locks at this point.
pub fn set_login_failure(
    conn: &Connection,
    id: &str,
    attempts: i64,
    lock_until: Option<&NaiveDateTime>,
) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE admins SET login_attempts = ?1, lock_until = ?2 WHERE id = ?3",
        params![attempts, lock_until.map(fmt_dt), id],
    )?;
    Ok(())
}

pub fn clear_login_failures(
    conn: &Connection,
    id: &str,
    last_login: &NaiveDateTime,
) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE admins SET login_attempts = 0, lock_until = NULL, last_login = ?1 WHERE id = ?2",
        params![fmt_dt(last_login), id],
    )?;
    Ok(())
}

pub fn update_admin_password(conn: &Connection, id: &str, password_hash: &str) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE admins SET password_hash = ?1 WHERE id = ?2",
        params![password_hash, id],
    )?;
    Ok(count > 0)
}

pub fn delete_admin(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM admins WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_admin_row(row: &rusqlite::Row) -> Result<Admin, rusqlite::Error> {
    let lock_until: Option<String> = row.get(6)?;
    let last_login: Option<String> = row.get(7)?;
    let created_at: String = row.get(8)?;

    Ok(Admin {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        email: row.get(3)?,
        role: row.get(4)?,
        login_attempts: row.get(5)?,
        lock_until: lock_until.as_deref().map(parse_dt),
        last_login: last_login.as_deref().map(parse_dt),
        created_at: parse_dt(&created_at),
    })
}
