#[derive(formbind::Bind)]
pub struct Fixed<const N: usize> {
    pub values: [u8; N],
}

fn main() {}
