//! Sale records and the name fields derived from them.

use std::fmt;

/// Text after the last space in `name`, or the whole string when there is no
/// space.
///
/// A name ending in a space yields `""`, which is a valid key like any other.
#[inline]
pub fn last_name(name: &str) -> &str {
    match name.rfind(' ') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

/// One sale transaction. Built once by the record source and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    date: String,
    salesperson_name: String,
    customer_name: String,
    car_make: String,
    car_model: String,
    car_year: i32,
    sale_price: f64,
    commission_rate: f64,
    commission_earned: f64,
}

impl SaleRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: impl Into<String>,
        salesperson_name: impl Into<String>,
        customer_name: impl Into<String>,
        car_make: impl Into<String>,
        car_model: impl Into<String>,
        car_year: i32,
        sale_price: f64,
        commission_rate: f64,
        commission_earned: f64,
    ) -> Self {
        Self {
            date: date.into(),
            salesperson_name: salesperson_name.into(),
            customer_name: customer_name.into(),
            car_make: car_make.into(),
            car_model: car_model.into(),
            car_year,
            sale_price,
            commission_rate,
            commission_earned,
        }
    }

    #[inline]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[inline]
    pub fn salesperson_name(&self) -> &str {
        &self.salesperson_name
    }

    #[inline]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[inline]
    pub fn car_make(&self) -> &str {
        &self.car_make
    }

    #[inline]
    pub fn car_model(&self) -> &str {
        &self.car_model
    }

    #[inline]
    pub fn car_year(&self) -> i32 {
        self.car_year
    }

    #[inline]
    pub fn sale_price(&self) -> f64 {
        self.sale_price
    }

    #[inline]
    pub fn commission_rate(&self) -> f64 {
        self.commission_rate
    }

    #[inline]
    pub fn commission_earned(&self) -> f64 {
        self.commission_earned
    }

    /// Customer surname, see [`last_name`].
    #[inline]
    pub fn customer_last_name(&self) -> &str {
        last_name(&self.customer_name)
    }

    /// Salesperson surname, see [`last_name`].
    #[inline]
    pub fn salesperson_last_name(&self) -> &str {
        last_name(&self.salesperson_name)
    }
}

impl fmt::Display for SaleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {}, {}, {}, {}, {}, {}, {}}}",
            self.date,
            self.salesperson_name,
            self.customer_name,
            self.car_make,
            self.car_model,
            self.car_year,
            self.sale_price,
            self.commission_rate,
            self.commission_earned
        )
    }
}

#[cfg(test)]
pub(crate) fn sample(salesperson: &str, customer: &str) -> SaleRecord {
    SaleRecord::new(
        "2022-08-01",
        salesperson,
        customer,
        "Honda",
        "Civic",
        2019,
        24_500.0,
        0.07,
        1_715.0,
    )
}
