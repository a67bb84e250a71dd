#[derive(formbind::Bind)]
pub struct User {
    #[bind(skip, options = "-")]
    pub is_admin: bool,
}

fn main() {}
