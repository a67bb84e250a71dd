#[derive(formbind::Bind)]
#[bind(rename_all = "Title Case")]
pub struct User {
    pub name: String,
}

fn main() {}
