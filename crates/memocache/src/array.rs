//! Range-sum queries over a mutable array, with and without a [`RangeCache`]

use crate::error::{Error, Result};
use crate::range::{RangeCache, RangeKey};

fn check_range(len: usize, left: usize, right: usize) -> Result<()> {
    if left > right || right >= len {
        return Err(Error::InvalidRange { left, right, len });
    }
    Ok(())
}

fn check_index(len: usize, index: usize) -> Result<()> {
    if index >= len {
        return Err(Error::IndexOutOfBounds { index, len });
    }
    Ok(())
}

fn checked_sum(array: &[i64], left: usize, right: usize) -> Result<i64> {
    array[left..=right]
        .iter()
        .try_fold(0i64, |acc, &v| acc.checked_add(v))
        .ok_or(Error::SumOverflow { left, right })
}

/// Sum of `array[left..=right]`, computed directly
pub fn range_sum_no_cache(array: &[i64], left: usize, right: usize) -> Result<i64> {
    check_range(array.len(), left, right)?;
    checked_sum(array, left, right)
}

/// Overwrite `array[index]`
pub fn update_no_cache(array: &mut [i64], index: usize, value: i64) -> Result<()> {
    check_index(array.len(), index)?;
    array[index] = value;
    Ok(())
}

/// Array whose range sums are memoized in a [`RangeCache`]
///
/// Updates write the array first, then invalidate every cached range that
/// spans the updated index.
pub struct RangeSumArray {
    values: Vec<i64>,
    cache: RangeCache,
}

impl RangeSumArray {
    /// Wrap `values` with a cache of the given capacity
    pub fn new(values: Vec<i64>, capacity: usize) -> Result<Self> {
        Ok(Self {
            values,
            cache: RangeCache::new(capacity)?,
        })
    }

    /// Sum of `[left, right]`, served from the cache when possible
    pub fn range_sum(&mut self, left: usize, right: usize) -> Result<i64> {
        check_range(self.values.len(), left, right)?;

        let key = RangeKey::new(left, right);
        if let Some(sum) = self.cache.get(key) {
            return Ok(sum);
        }

        let sum = checked_sum(&self.values, left, right)?;
        self.cache.put(key, sum);
        Ok(sum)
    }

    /// Overwrite one element and drop every cached range containing it
    pub fn update(&mut self, index: usize, value: i64) -> Result<()> {
        update_no_cache(&mut self.values, index, value)?;
        self.cache.invalidate_range_containing_index(index);
        Ok(())
    }

    /// Current array contents
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Underlying cache
    pub fn cache(&self) -> &RangeCache {
        &self.cache
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the array is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
