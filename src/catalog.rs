//! The fixed dish catalog.
//! Loaded once at startup and never mutated afterwards; orders copy the
//! dishes they reference so a future menu change cannot alter a placed order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: u32,
    pub name: String,
    pub price: u32,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    dishes: Vec<Dish>,
}

impl Catalog {
    pub fn new(dishes: Vec<Dish>) -> Self {
        Self { dishes }
    }

    /// The standard dinner menu, prices in whole rupees.
    pub fn standard() -> Self {
        Self::new(vec![
            Dish {
                id: 1,
                name: "Biryani".to_string(),
                price: 180,
            },
            Dish {
                id: 2,
                name: "Butter Chicken".to_string(),
                price: 150,
            },
            Dish {
                id: 3,
                name: "Tandoori Chicken".to_string(),
                price: 120,
            },
            Dish {
                id: 4,
                name: "Rogan Josh".to_string(),
                price: 100,
            },
            Dish {
                id: 5,
                name: "Chicken Tikka Masala".to_string(),
                price: 100,
            },
        ])
    }

    /// Dishes in configured menu order.
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn dish(&self, id: u32) -> Option<&Dish> {
        self.dishes.iter().find(|dish| dish.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
