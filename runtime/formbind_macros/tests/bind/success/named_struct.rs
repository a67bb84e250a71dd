use formbind::{BindStruct, Bindable, FieldLookup, Kind};

#[derive(formbind::Bind, Default)]
pub struct User {
    pub name: String,
    pub age: u8,
    pub created_at: jiff::Timestamp,
    pub tags: Vec<String>,
    pub address: Option<Address>,
    secret: String,
}

#[derive(formbind::Bind, Default)]
pub struct Address {
    pub city: String,
}

fn main() {
    let mut user = User::default();
    assert_eq!(user.kind(), Kind::Struct);
    assert_eq!(user.type_name(), "User");

    let user = user.as_struct_mut().unwrap();
    assert_eq!(user.struct_name(), "User");
    assert_eq!(user.fields().len(), 6);
    assert!(matches!(user.field_mut("name"), FieldLookup::Settable { .. }));
    assert!(matches!(user.field_mut("secret"), FieldLookup::Unsettable { .. }));
    assert!(matches!(user.field_mut("nickname"), FieldLookup::Missing));
}
