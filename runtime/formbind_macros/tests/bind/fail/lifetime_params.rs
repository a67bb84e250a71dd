#[derive(formbind::Bind)]
pub struct Borrowed<'a> {
    pub name: &'a str,
}

fn main() {}
