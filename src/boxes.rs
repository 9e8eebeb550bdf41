use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BoxesError {
    #[error("filled boxes are not strictly increasing at index {0}")]
    NotIncreasing(usize),
}

/// The row of ordered boxes. Each slot is empty or holds one number.
///
/// ```
/// use roskis::boxes::Boxes;
///
/// let row = Boxes::try_from_slots(vec![Some(2), None, Some(9)]).unwrap();
/// assert_eq!(row.len(), 3);
/// assert_eq!(row.filled_count(), 2);
/// assert!(!row.is_full());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boxes {
    slots: Vec<Option<u16>>,
}

impl Boxes {
    pub fn empty(len: usize) -> Self {
        Self { slots: vec![None; len] }
    }

    /// Build a row from explicit slots, checking the increasing order.
    pub fn try_from_slots(slots: Vec<Option<u16>>) -> Result<Self, BoxesError> {
        let row = Self { slots };
        if let Some(idx) = row.first_order_violation() {
            return Err(BoxesError::NotIncreasing(idx));
        }
        Ok(row)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn as_slice(&self) -> &[Option<u16>] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<u16> {
        self.slots.get(index).copied().flatten()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Filled values, left to right.
    pub fn values(&self) -> impl Iterator<Item = u16> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn contains(&self, number: u16) -> bool {
        self.values().any(|v| v == number)
    }

    /// `(index, value)` pairs for every slot, as reported to the presentation layer.
    pub fn snapshot(&self) -> Vec<(usize, Option<u16>)> {
        self.slots.iter().copied().enumerate().collect()
    }

    /// Index of the first filled slot whose value is not greater than the
    /// filled slot before it, if any.
    pub fn first_order_violation(&self) -> Option<usize> {
        let mut prev: Option<u16> = None;
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(v) = *slot {
                if prev.is_some_and(|p| v <= p) {
                    return Some(i);
                }
                prev = Some(v);
            }
        }
        None
    }

    pub fn is_increasing(&self) -> bool {
        self.first_order_violation().is_none()
    }

    /// Whether `number` fits between its filled neighbours at `index`.
    /// Does not check occupancy of `index` itself.
    pub fn respects_order(&self, number: u16, index: usize) -> bool {
        let left_ok = self.slots[..index.min(self.slots.len())].iter().flatten().all(|&v| v < number);
        let right_ok = self.slots.iter().skip(index + 1).flatten().all(|&v| v > number);
        left_ok && right_ok
    }

    /// Copy of the row with `number` written at `index`.
    pub(crate) fn with(&self, index: usize, number: u16) -> Self {
        let mut next = self.clone();
        next.slots[index] = Some(number);
        next
    }

    pub(crate) fn set(&mut self, index: usize, number: u16) {
        self.slots[index] = Some(number);
    }
}

impl fmt::Display for Boxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .slots
            .iter()
            .map(|s| s.map(|v| v.to_string()).unwrap_or_else(|| "_".to_string()))
            .collect();
        write!(f, "[{}]", parts.join(" "))
    }
}
