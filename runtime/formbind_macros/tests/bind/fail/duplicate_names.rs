#[derive(formbind::Bind)]
pub struct User {
    pub name: String,
    #[bind(rename = "name")]
    pub nickname: String,
}

fn main() {}
