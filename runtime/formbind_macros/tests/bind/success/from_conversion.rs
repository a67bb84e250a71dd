use formbind::{Bind, Bindable, BoxError, FromConversion, Kind};

#[derive(Bind, Default)]
#[bind(from_conversion)]
pub struct Cents(pub u64);

impl FromConversion for Cents {
    fn from_string(&mut self, content: &str) -> Result<(), BoxError> {
        self.0 = content.parse()?;
        Ok(())
    }
}

#[derive(Bind, Default)]
#[bind(from_conversion)]
pub struct Money {
    pub amount: u64,
    pub currency: String,
}

impl FromConversion for Money {
    fn from_string(&mut self, content: &str) -> Result<(), BoxError> {
        let (amount, currency) = content.split_once(' ').ok_or("expected `<amount> <currency>`")?;
        self.amount = amount.parse()?;
        self.currency = currency.to_owned();
        Ok(())
    }
}

fn main() {
    let mut cents = Cents::default();
    assert_eq!(cents.kind(), Kind::Struct);
    // Tuple structs expose no fields.
    assert!(cents.as_struct_mut().is_none());

    // Structs with named fields can still be traversed.
    let mut money = Money::default();
    assert!(money.as_struct_mut().is_some());
}
