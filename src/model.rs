//! Data model for a resume document.
//!
//! The YAML schema is deliberately permissive at the parse stage: every
//! top-level field is optional here so that [`crate::pipeline::load`] accepts
//! incomplete documents and [`crate::pipeline::validate`] can report *all*
//! missing and empty fields in one aggregated error instead of failing on the
//! first absent key. The one place the schema is strict is [`ImageRef`]: an
//! image map with an unknown `type` tag is a parse error, not a runtime
//! fallback.

use serde::{Deserialize, Deserializer, Serialize};

/// One resume document, as authored in YAML and carried through the pipeline.
///
/// Required-after-validation fields are `Option` so presence ("key exists")
/// and emptiness ("key exists but is blank") stay distinguishable — the
/// validator needs both lists. After [`crate::pipeline::validate`] returns
/// `Ok`, every required field is `Some` and non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub name: Option<String>,
    /// ISO calendar date, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub summary: Option<String>,

    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,

    #[serde(default)]
    pub experience: Option<Vec<Experience>>,
    #[serde(default)]
    pub education: Option<Vec<Education>>,
    #[serde(default)]
    pub skills: Option<Vec<Skill>>,
    /// Plain strings, e.g. `"English (fluent)"`.
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub projects: Option<Vec<Project>>,

    #[serde(default)]
    pub certifications: Vec<Certification>,

    /// Profile photo. Starts life as an [`ImageRef`]; the image resolver
    /// replaces it in place with the plain string the template consumes.
    #[serde(default)]
    pub profile_image: Option<ImageSlot>,

    /// Destination of the primary HTML artifact. Injected by the caller
    /// before image resolution (it anchors the sibling `images/` directory),
    /// not authored by the user in normal use.
    #[serde(default)]
    pub output_html: Option<String>,

    /// Whole years, derived from `date_of_birth` by the enricher.
    /// Never user-supplied; 0 when the birth date is absent or unparseable.
    #[serde(default)]
    pub age: u32,
}

/// One entry under `experience:`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// One entry under `education:`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

/// One entry under `skills:`. `level` is a 0–100 proficiency used by the
/// template to draw skill bars.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: u8,
}

/// One entry under `projects:`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image: Option<ImageSlot>,
}

/// One entry under `certifications:`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub link: String,
}

/// Source of an image, as authored in the document.
///
/// ```yaml
/// profile_image:
///   type: url
///   value: https://example.com/me.png
///   download: true
/// ```
///
/// The enum is closed: a `type:` other than `url` or `path` fails YAML
/// parsing, so downstream code never sees an unknown kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImageRef {
    /// Remote resource. With `download: true` the resolver fetches it into
    /// the images directory; otherwise the URL is passed to the template
    /// unchanged.
    Url {
        value: String,
        #[serde(default)]
        download: bool,
    },
    /// Local file. Must exist at resolution time or the slot resolves empty.
    Path { value: String },
}

/// Lifecycle states of an image field.
///
/// Authored documents carry `Ref`; the image resolver rewrites each slot to
/// `Resolved`, whose untagged serialization is the bare string the template
/// renders. A hand-written plain string deserializes directly as `Resolved`
/// and passes through resolution untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSlot {
    Ref(ImageRef),
    Resolved(String),
}

/// Accept any YAML scalar for a string field, stringifying numbers and
/// booleans. A numeric `phone: 5551234` must survive parsing and must never
/// be classified as empty by the validator.
fn lenient_scalar<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(de)?.map(|s| match s {
        Scalar::Str(v) => v,
        Scalar::Int(v) => v.to_string(),
        Scalar::Float(v) => v.to_string(),
        Scalar::Bool(v) => v.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_document_parses_with_everything_missing() {
        let rec: ResumeRecord = serde_yaml::from_str("name: Ada Lovelace\n").unwrap();
        assert_eq!(rec.name.as_deref(), Some("Ada Lovelace"));
        assert!(rec.email.is_none());
        assert!(rec.experience.is_none());
        assert_eq!(rec.age, 0);
    }

    #[test]
    fn numeric_phone_is_stringified() {
        let rec: ResumeRecord = serde_yaml::from_str("phone: 5551234\n").unwrap();
        assert_eq!(rec.phone.as_deref(), Some("5551234"));
    }

    #[test]
    fn unknown_top_level_keys_are_ignored() {
        let rec: ResumeRecord =
            serde_yaml::from_str("name: X\nfavourite_colour: mauve\n").unwrap();
        assert_eq!(rec.name.as_deref(), Some("X"));
    }

    #[test]
    fn image_ref_url_parses_with_default_download() {
        let slot: ImageSlot =
            serde_yaml::from_str("type: url\nvalue: https://x/photo.png\n").unwrap();
        assert_eq!(
            slot,
            ImageSlot::Ref(ImageRef::Url {
                value: "https://x/photo.png".into(),
                download: false,
            })
        );
    }

    #[test]
    fn image_ref_unknown_kind_is_a_parse_error() {
        let res: Result<ImageSlot, _> = serde_yaml::from_str("type: carrier-pigeon\nvalue: x\n");
        assert!(res.is_err(), "unknown image kinds must not parse");
    }

    #[test]
    fn plain_string_image_is_already_resolved() {
        let slot: ImageSlot = serde_yaml::from_str("\"photos/me.png\"").unwrap();
        assert_eq!(slot, ImageSlot::Resolved("photos/me.png".into()));
    }

    #[test]
    fn resolved_slot_serializes_as_bare_string() {
        let s = serde_yaml::to_string(&ImageSlot::Resolved("img/a.png".into())).unwrap();
        assert_eq!(s.trim(), "img/a.png");
    }
}
