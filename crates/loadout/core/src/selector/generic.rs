//! Selector matching any item kind of a generic category.

use std::sync::Arc;

use crate::category::GenericCategory;
use crate::thing::Thing;

#[derive(Clone, Debug)]
pub struct GenericThingSelector {
    category: Arc<GenericCategory>,
}

impl GenericThingSelector {
    pub fn new(category: Arc<GenericCategory>) -> Self {
        Self { category }
    }

    pub fn category(&self) -> &Arc<GenericCategory> {
        &self.category
    }

    pub fn matches(&self, thing: &Thing) -> bool {
        self.category.includes(&thing.def)
    }

    /// One unit of the category representative.
    pub fn make_sample(&self) -> Thing {
        Thing::new(self.category.representative().clone())
    }
}
