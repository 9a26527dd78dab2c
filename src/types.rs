//! Records, request payloads and response bodies.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, types::Json, FromRow, Row};

use crate::error::{validation, AppResult};
use crate::store::{Draft, Field, Record};

/// A record with a request payload that creates or replaces it.
pub trait Editable: Record {
    type Input: Draft + DeserializeOwned + Send + 'static;
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
}

impl Record for Product {
    const TABLE: &'static str = "products";
    const LABEL: &'static str = "Product";
}

impl Editable for Product {
    type Input = ProductInput;
}

impl Draft for ProductInput {
    fn fields(&self) -> Vec<(&'static str, Field)> {
        vec![
            ("name", Field::Text(self.name.trim().to_string())),
            ("description", Field::Text(self.description.clone())),
            ("price", Field::Real(self.price)),
            ("image", Field::Text(self.image.clone())),
        ]
    }

    fn validate(&self) -> AppResult<()> {
        validation::require_non_empty(&self.name, "name")?;
        validation::max_len(&self.name, validation::MAX_TEXT_LEN, "name")?;
        validation::validate_price(self.price)
    }
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceInput {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl Record for Service {
    const TABLE: &'static str = "services";
    const LABEL: &'static str = "Service";
}

impl Editable for Service {
    type Input = ServiceInput;
}

impl Draft for ServiceInput {
    fn fields(&self) -> Vec<(&'static str, Field)> {
        vec![
            ("title", Field::Text(self.title.trim().to_string())),
            ("description", Field::Text(self.description.clone())),
            ("image", Field::Text(self.image.clone())),
        ]
    }

    fn validate(&self) -> AppResult<()> {
        validation::require_non_empty(&self.title, "title")?;
        validation::max_len(&self.title, validation::MAX_TEXT_LEN, "title")
    }
}

// ---------------------------------------------------------------------------
// About (singleton)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct About {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AboutInput {
    pub title: String,
    pub content: String,
    pub image: String,
}

impl Record for About {
    const TABLE: &'static str = "about";
    const LABEL: &'static str = "About";
}

impl Editable for About {
    type Input = AboutInput;
}

impl Draft for AboutInput {
    fn fields(&self) -> Vec<(&'static str, Field)> {
        vec![
            ("title", Field::Text(self.title.clone())),
            ("content", Field::Text(self.content.clone())),
            ("image", Field::Text(self.image.clone())),
        ]
    }
}

// ---------------------------------------------------------------------------
// Contact (singleton)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub weekday_hours: Option<String>,
    pub saturday_hours: Option<String>,
    pub sunday_hours: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInput {
    pub title: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub weekday_hours: Option<String>,
    pub saturday_hours: Option<String>,
    pub sunday_hours: Option<String>,
}

impl Record for Contact {
    const TABLE: &'static str = "contact";
    const LABEL: &'static str = "Contact";
}

impl Editable for Contact {
    type Input = ContactInput;
}

impl Draft for ContactInput {
    fn fields(&self) -> Vec<(&'static str, Field)> {
        vec![
            ("title", Field::Text(self.title.clone())),
            ("phone", Field::Text(self.phone.clone())),
            ("email", Field::Text(self.email.clone())),
            ("address", Field::Text(self.address.clone())),
            ("latitude", Field::OptionalReal(self.latitude)),
            ("longitude", Field::OptionalReal(self.longitude)),
            ("weekday_hours", Field::OptionalText(self.weekday_hours.clone())),
            ("saturday_hours", Field::OptionalText(self.saturday_hours.clone())),
            ("sunday_hours", Field::OptionalText(self.sunday_hours.clone())),
        ]
    }

    fn validate(&self) -> AppResult<()> {
        validation::validate_range(self.latitude, -90.0, 90.0, "latitude")?;
        validation::validate_range(self.longitude, -180.0, 180.0, "longitude")
    }
}

// ---------------------------------------------------------------------------
// Hero (singleton)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: i64,
    pub subheading: String,
    pub heading: String,
    pub button_text: String,
    pub background_image: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroInput {
    pub subheading: String,
    pub heading: String,
    pub button_text: String,
    pub background_image: String,
}

impl Record for Hero {
    const TABLE: &'static str = "hero";
    const LABEL: &'static str = "Hero";
}

impl Editable for Hero {
    type Input = HeroInput;
}

impl Draft for HeroInput {
    fn fields(&self) -> Vec<(&'static str, Field)> {
        vec![
            ("subheading", Field::Text(self.subheading.clone())),
            ("heading", Field::Text(self.heading.clone())),
            ("button_text", Field::Text(self.button_text.clone())),
            ("background_image", Field::Text(self.background_image.clone())),
        ]
    }
}

// ---------------------------------------------------------------------------
// Footer (singleton)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub id: i64,
    pub copyright: String,
    pub social_links: BTreeMap<String, String>,
    pub links: BTreeMap<String, String>,
}

// Link maps are stored as JSON text.
impl<'r> FromRow<'r, SqliteRow> for Footer {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let social_links: Json<BTreeMap<String, String>> = row.try_get("social_links")?;
        let links: Json<BTreeMap<String, String>> = row.try_get("links")?;
        Ok(Footer {
            id: row.try_get("id")?,
            copyright: row.try_get("copyright")?,
            social_links: social_links.0,
            links: links.0,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterInput {
    pub copyright: String,
    pub social_links: BTreeMap<String, String>,
    pub links: BTreeMap<String, String>,
}

impl Record for Footer {
    const TABLE: &'static str = "footer";
    const LABEL: &'static str = "Footer";
}

impl Editable for Footer {
    type Input = FooterInput;
}

impl Draft for FooterInput {
    fn fields(&self) -> Vec<(&'static str, Field)> {
        vec![
            ("copyright", Field::Text(self.copyright.clone())),
            ("social_links", Field::Map(self.social_links.clone())),
            ("links", Field::Map(self.links.clone())),
        ]
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string.
    #[serde(skip_serializing)]
    pub password: String,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Record for User {
    const TABLE: &'static str = "users";
    const LABEL: &'static str = "User";
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_id: Option<i64>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<i64>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Auth and misc payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
    pub role_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// A message sent from the public contact form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
