#[derive(formbind::Bind)]
pub struct Wrapper<T> {
    pub inner: T,
}

fn main() {}
