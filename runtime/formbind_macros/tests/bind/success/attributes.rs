use formbind::{BindStruct, FieldLookup};

// Non-public and skipped fields don't need to be bindable.
pub struct Session;

#[derive(formbind::Bind, Default)]
#[bind(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    #[bind(rename = "mail")]
    pub email_address: String,
    #[bind(filter = "html")]
    pub bio: String,
    #[bind(skip)]
    pub is_admin: bool,
    #[bind(options = "-")]
    pub role: String,
    session: Option<Session>,
}

fn main() {
    let mut profile = Profile::default();
    let names: Vec<_> = profile.fields().iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        ["displayName", "mail", "bio", "isAdmin", "role", "session"]
    );

    let bio = &profile.fields()[2];
    assert_eq!(bio.tag("form_filter"), Some("html"));

    let is_admin = &profile.fields()[3];
    assert!(!is_admin.is_settable());
    assert_eq!(is_admin.tag("form_options"), Some("-"));

    assert!(matches!(
        profile.field_mut("displayName"),
        FieldLookup::Settable { .. }
    ));
    assert!(matches!(
        profile.field_mut("display_name"),
        FieldLookup::Missing
    ));
}
