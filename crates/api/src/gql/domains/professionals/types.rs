use async_graphql::{InputObject, SimpleObject, ID};
use chrono::{DateTime, Utc};

#[derive(SimpleObject, Clone)]
pub struct SportsProfessional {
    pub id: ID,
    pub user_id: ID,
    pub sport: String,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub hourly_rate_cents: Option<i32>,
    pub years_experience: Option<i32>,
    pub certifications: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<infra::models::SportsProfessionalRow> for SportsProfessional {
    fn from(row: infra::models::SportsProfessionalRow) -> Self {
        SportsProfessional {
            id: row.id.into(),
            user_id: row.user_id.into(),
            sport: row.sport,
            bio: row.bio,
            city: row.city,
            hourly_rate_cents: row.hourly_rate_cents,
            years_experience: row.years_experience,
            certifications: row.certifications,
            created_at: row.created_at,
        }
    }
}

/// Autosaved wizard state. The payload is the raw step form data; the
/// server treats it as opaque JSON until submission.
#[derive(SimpleObject, Clone)]
pub struct ProfessionalDraft {
    pub user_id: ID,
    pub step: i32,
    pub payload: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl From<infra::models::ProfessionalDraftRow> for ProfessionalDraft {
    fn from(row: infra::models::ProfessionalDraftRow) -> Self {
        ProfessionalDraft {
            user_id: row.user_id.into(),
            step: row.step,
            payload: row.payload,
            updated_at: row.updated_at,
        }
    }
}

#[derive(InputObject, Clone)]
pub struct SubmitProfessionalInput {
    pub sport: String,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub hourly_rate_cents: Option<i32>,
    pub years_experience: Option<i32>,
    #[graphql(default)]
    pub certifications: Vec<String>,
}
