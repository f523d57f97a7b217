use crate::units::{UnitDef, UnitElement};

impl UnitDef {
    /// Two definitions match when their components match as multisets.
    ///
    /// An explicitly named receiver only matches a definition with the same
    /// name; auto-generated names are ignored.
    pub fn matches(&self, other: &UnitDef) -> bool {
        if !self.name_autogenerated() && self.name() != other.name() {
            return false;
        }
        self.components_match(other)
    }

    /// Order-insensitive comparison of the two component lists. Each element
    /// of the receiver is paired off with one element of `other` that is
    /// either structurally equal or its exact inverse, so `meter` pairs with
    /// both `meter` and `meter^-1`. The definitions are equivalent iff
    /// nothing is left over on either side.
    pub fn components_match(&self, other: &UnitDef) -> bool {
        let mut remaining: Vec<&UnitElement> = other.unit_elements().iter().collect();
        if remaining.len() != self.num_unit_elements() {
            return false;
        }
        for el in self.unit_elements() {
            let paired = remaining
                .iter()
                .position(|candidate| el.matches(candidate) || el.cancels(candidate));
            match paired {
                Some(index) => {
                    remaining.swap_remove(index);
                }
                None => return false,
            }
        }
        remaining.is_empty()
    }
}
