//! Dashboard resources and their table schemas

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use inframe_table::{CellValue, ColumnSpec, Record};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Resources managed through the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    AboutUs,
    Partners,
    LifeAtInframe,
    Contacts,
    Memberships,
    Blogs,
}

impl ResourceKind {
    /// Every resource in screen order
    pub const ALL: [Self; 6] = [
        Self::AboutUs,
        Self::Partners,
        Self::LifeAtInframe,
        Self::Contacts,
        Self::Memberships,
        Self::Blogs,
    ];

    /// Backend collection path
    pub fn path(self) -> &'static str {
        match self {
            Self::AboutUs => "/api/about-us",
            Self::Partners => "/api/company",
            Self::LifeAtInframe => "/api/life-at-inframe",
            Self::Contacts => "/api/contact",
            Self::Memberships => "/api/membership",
            Self::Blogs => "/api/blog",
        }
    }

    /// Route segment used in dashboard routes
    pub fn slug(self) -> &'static str {
        match self {
            Self::AboutUs => "about-us",
            Self::Partners => "partners",
            Self::LifeAtInframe => "life-at-inframe",
            Self::Contacts => "contacts",
            Self::Memberships => "memberships",
            Self::Blogs => "blogs",
        }
    }

    /// Screen title
    pub fn label(self) -> &'static str {
        match self {
            Self::AboutUs => "About Us",
            Self::Partners => "Industry Partners",
            Self::LifeAtInframe => "Life at Inframe",
            Self::Contacts => "Contacts",
            Self::Memberships => "Memberships",
            Self::Blogs => "Blog",
        }
    }

    /// Base route that row activation appends record ids to
    pub fn base_route(self) -> String {
        format!("/dashboard/{}", self.slug())
    }

    /// Path of a single record
    pub fn item_path(self, id: &str) -> String {
        format!("{}/{id}", self.path())
    }

    /// Table schema for the resource's screen
    pub fn columns(self) -> Vec<ColumnSpec> {
        match self {
            Self::AboutUs => vec![
                ColumnSpec::new("title", "Title").class("bold"),
                ColumnSpec::new("description", "Description"),
                ColumnSpec::new("image", "Image"),
            ],
            Self::Partners => vec![
                ColumnSpec::new("logo", "Logo"),
                ColumnSpec::new("name", "Company").class("bold"),
                ColumnSpec::new("industry", "Industry"),
                ColumnSpec::new("website", "Website").class("muted"),
            ],
            Self::LifeAtInframe => vec![
                ColumnSpec::new("image", "Image"),
                ColumnSpec::new("title", "Title").class("bold"),
                ColumnSpec::new("category", "Category").class("accent"),
                ColumnSpec::new("description", "Description"),
            ],
            Self::Contacts => vec![
                ColumnSpec::new("name", "Name").class("bold"),
                ColumnSpec::new("email", "Email").class("mono"),
                ColumnSpec::new("phone", "Phone"),
                ColumnSpec::new("subject", "Subject"),
                ColumnSpec::new("message", "Message"),
                ColumnSpec::new("createdAt", "Received").class("muted"),
            ],
            Self::Memberships => vec![
                ColumnSpec::new("name", "Name").class("bold"),
                ColumnSpec::new("email", "Email").class("mono"),
                ColumnSpec::new("phone", "Phone"),
                ColumnSpec::new("course", "Course").class("accent"),
                ColumnSpec::new("status", "Status"),
            ],
            Self::Blogs => vec![
                ColumnSpec::new("coverImage", "Cover"),
                ColumnSpec::new("title", "Title").class("bold"),
                ColumnSpec::new("author", "Author"),
                ColumnSpec::new("tags", "Tags").class("accent"),
                ColumnSpec::new("createdAt", "Created").class("muted"),
            ],
        }
    }

    /// Resolve a dashboard route like `/dashboard/partners/42`
    pub fn parse_route(route: &str) -> Option<(Self, String)> {
        let rest = route.strip_prefix("/dashboard/")?;
        let (slug, id) = rest.split_once('/')?;
        let id = id.trim_end_matches('/');
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some((slug.parse().ok()?, id.to_string()))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error for an unrecognised resource name
#[derive(Debug, Clone, Error)]
#[error("unknown resource: {0}")]
pub struct UnknownResource(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.slug() == wanted
                    || kind.path().trim_start_matches("/api/") == wanted
                    || kind.label().to_lowercase().replace(' ', "-") == wanted
            })
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

/// A backend record type with a table representation
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Which collection the type belongs to
    const KIND: ResourceKind;

    /// Backend id, absent on records not yet created
    fn id(&self) -> Option<&str>;

    /// Cells for the resource's table schema
    fn to_record(&self) -> Option<Record>;

    /// Decode one backend row
    ///
    /// Rows serialized with virtuals carry both `_id` and `id`; `_id` wins.
    fn from_json(mut value: Value) -> serde_json::Result<Self> {
        if let Value::Object(fields) = &mut value {
            if fields.contains_key("_id") {
                fields.remove("id");
            }
        }
        serde_json::from_value(value)
    }
}

/// `null` or a missing field become the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Record ids arrive as strings or numbers; anything else counts as absent
fn backend_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Some(id),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

fn text(value: &str) -> Option<CellValue> {
    (!value.is_empty()).then(|| CellValue::text(value))
}

fn opt_text(value: Option<&String>) -> Option<CellValue> {
    value.filter(|v| !v.is_empty()).map(CellValue::text)
}

fn opt_image(value: Option<&String>) -> Option<CellValue> {
    value.filter(|v| !v.is_empty()).map(CellValue::image)
}

fn date(value: Option<&DateTime<Utc>>) -> Option<CellValue> {
    value.map(|at| CellValue::string(at.format("%Y-%m-%d").to_string()))
}

/// About Us page section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutUsSection {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "backend_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for AboutUsSection {
    const KIND: ResourceKind = ResourceKind::AboutUs;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_record(&self) -> Option<Record> {
        Some(
            Record::new(self.id()?)
                .with_opt("title", text(&self.title))
                .with_opt("description", text(&self.description))
                .with_opt("image", opt_image(self.image.as_ref())),
        )
    }
}

/// Industry partner company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "backend_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Company {
    const KIND: ResourceKind = ResourceKind::Partners;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_record(&self) -> Option<Record> {
        Some(
            Record::new(self.id()?)
                .with_opt("logo", opt_image(self.logo.as_ref()))
                .with_opt("name", text(&self.name))
                .with_opt("industry", opt_text(self.industry.as_ref()))
                .with_opt("website", opt_text(self.website.as_ref())),
        )
    }
}

/// Life at Inframe gallery post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifePost {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "backend_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for LifePost {
    const KIND: ResourceKind = ResourceKind::LifeAtInframe;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_record(&self) -> Option<Record> {
        Some(
            Record::new(self.id()?)
                .with_opt("image", opt_image(self.image.as_ref()))
                .with_opt("title", text(&self.title))
                .with_opt("category", opt_text(self.category.as_ref()))
                .with_opt("description", opt_text(Some(&self.description))),
        )
    }
}

/// Contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "backend_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for ContactSubmission {
    const KIND: ResourceKind = ResourceKind::Contacts;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_record(&self) -> Option<Record> {
        Some(
            Record::new(self.id()?)
                .with_opt("name", text(&self.name))
                .with_opt("email", text(&self.email))
                .with_opt("phone", opt_text(self.phone.as_ref()))
                .with_opt("subject", opt_text(self.subject.as_ref()))
                .with_opt("message", text(&self.message))
                .with_opt("createdAt", date(self.created_at.as_ref())),
        )
    }
}

/// Membership application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "backend_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Membership {
    const KIND: ResourceKind = ResourceKind::Memberships;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_record(&self) -> Option<Record> {
        Some(
            Record::new(self.id()?)
                .with_opt("name", text(&self.name))
                .with_opt("email", text(&self.email))
                .with_opt("phone", opt_text(self.phone.as_ref()))
                .with_opt("course", opt_text(self.course.as_ref()))
                .with_opt("status", opt_text(self.status.as_ref())),
        )
    }
}

/// Blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "backend_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for BlogPost {
    const KIND: ResourceKind = ResourceKind::Blogs;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn to_record(&self) -> Option<Record> {
        let tags = (!self.tags.is_empty()).then(|| CellValue::string(self.tags.join(", ")));
        Some(
            Record::new(self.id()?)
                .with_opt("coverImage", opt_image(self.cover_image.as_ref()))
                .with_opt("title", text(&self.title))
                .with_opt("author", opt_text(self.author.as_ref()))
                .with_opt("tags", tags)
                .with_opt("createdAt", date(self.created_at.as_ref())),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("partners".parse::<ResourceKind>().unwrap(), ResourceKind::Partners);
        assert_eq!("company".parse::<ResourceKind>().unwrap(), ResourceKind::Partners);
        assert_eq!("Life_At_Inframe".parse::<ResourceKind>().unwrap(), ResourceKind::LifeAtInframe);
        assert!("alumni".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_slugs_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.slug().parse::<ResourceKind>().unwrap(), kind);
            assert!(!kind.columns().is_empty());
        }
    }

    #[test]
    fn test_parse_route() {
        assert_eq!(
            ResourceKind::parse_route("/dashboard/contacts/42"),
            Some((ResourceKind::Contacts, "42".to_string()))
        );
        assert_eq!(ResourceKind::parse_route("/dashboard/contacts"), None);
        assert_eq!(ResourceKind::parse_route("/dashboard/contacts/"), None);
        assert_eq!(ResourceKind::parse_route("/dashboard/unknown/1"), None);
        assert_eq!(ResourceKind::parse_route("/elsewhere/contacts/1"), None);
    }

    #[test]
    fn test_company_from_mongo_json() {
        let company: Company = serde_json::from_value(json!({
            "_id": "65f0c1",
            "name": "Acme Studios",
            "logo": "https://cdn.example/acme.png",
            "createdAt": "2024-03-12T10:00:00.000Z",
            "__v": 0
        }))
        .unwrap();

        assert_eq!(company.id(), Some("65f0c1"));
        let record = company.to_record().unwrap();
        assert_eq!(record.get("logo"), Some(&CellValue::image("https://cdn.example/acme.png")));
        assert_eq!(record.get("name"), Some(&CellValue::text("Acme Studios")));
        assert_eq!(record.get("website"), None);
    }

    #[test]
    fn test_new_record_serializes_without_id() {
        let post = LifePost {
            id: None,
            title: "Freshers".into(),
            description: "Welcome week".into(),
            image: None,
            category: Some("events".into()),
            created_at: None,
        };
        let json = serde_json::to_value(&post).unwrap();

        assert_eq!(json, json!({"title": "Freshers", "description": "Welcome week", "category": "events"}));
        assert!(post.to_record().is_none());
    }

    #[test]
    fn test_contact_record_date() {
        let contact: ContactSubmission = serde_json::from_value(json!({
            "id": "c1",
            "name": "Asha",
            "email": "asha@example.com",
            "message": "Admissions query",
            "createdAt": "2024-05-01T08:30:00Z"
        }))
        .unwrap();

        let record = contact.to_record().unwrap();
        assert_eq!(record.get("createdAt"), Some(&CellValue::string("2024-05-01")));
        assert_eq!(record.get("phone"), None);
    }

    #[test]
    fn test_id_and_virtual_id_together() {
        let company = Company::from_json(json!({"_id": "1", "id": "1", "name": "Acme"})).unwrap();
        assert_eq!(company.id(), Some("1"));

        let post = LifePost::from_json(json!({"id": "l1", "title": "Freshers"})).unwrap();
        assert_eq!(post.id(), Some("l1"));

        let member = Membership::from_json(json!({"_id": 7, "name": "Ravi", "email": "r@x"})).unwrap();
        assert_eq!(member.id(), Some("7"));
    }

    #[test]
    fn test_null_display_fields_render_placeholder() {
        let post = LifePost::from_json(json!({"_id": "1", "title": "x", "description": null}))
            .unwrap();
        assert_eq!(post.description, "");
        assert_eq!(post.to_record().unwrap().get("description"), None);

        let blog = BlogPost::from_json(json!({
            "_id": "b2",
            "title": null,
            "content": null,
            "tags": null
        }))
        .unwrap();
        let record = blog.to_record().unwrap();
        assert_eq!(record.get("title"), None);
        assert_eq!(record.get("tags"), None);
    }

    #[test]
    fn test_blog_tags_cell() {
        let post: BlogPost = serde_json::from_value(json!({
            "_id": "b1",
            "title": "Studio notes",
            "tags": ["animation", "vfx"]
        }))
        .unwrap();

        let record = post.to_record().unwrap();
        assert_eq!(record.get("tags"), Some(&CellValue::string("animation, vfx")));
        assert_eq!(record.get("coverImage"), None);
    }
}
