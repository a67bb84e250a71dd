#[derive(formbind::Bind)]
pub struct User {
    #[bind(rename = "")]
    pub name: String,
}

fn main() {}
