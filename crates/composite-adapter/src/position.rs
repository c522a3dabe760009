//! Absolute ⇄ relative position translation.
//!
//! Counts are read live from every provider on each call instead of being
//! cached as prefix sums, so translation stays correct when providers change
//! size between calls. Composites hold few providers, which keeps the linear
//! walk cheap.

use crate::{AdapterError, ProviderId, Result, SharedProvider};

/// Borrowed view over a composite's providers, in registration order.
pub struct PositionTranslator<'a, Cx, H> {
    providers: &'a [SharedProvider<Cx, H>],
}

impl<'a, Cx, H> PositionTranslator<'a, Cx, H> {
    pub fn new(providers: &'a [SharedProvider<Cx, H>]) -> Self {
        Self { providers }
    }

    /// Sum of every provider's current count.
    pub fn total_count(&self) -> usize {
        self.providers.iter().map(|p| p.item_count()).sum()
    }

    /// Finds the provider owning `absolute` and the position within it.
    pub fn resolve(&self, absolute: usize) -> Result<(ProviderId, usize)> {
        let mut remaining = absolute;
        for (index, provider) in self.providers.iter().enumerate() {
            let count = provider.item_count();
            if remaining < count {
                return Ok((ProviderId(index), remaining));
            }
            remaining -= count;
        }
        // `remaining` is now `absolute - total`.
        Err(AdapterError::out_of_range(absolute, absolute - remaining))
    }

    /// Maps a position in provider `id` back into absolute space.
    ///
    /// `relative` may equal the provider's count: that is the insertion
    /// point one past its last item.
    pub fn rebase(&self, id: ProviderId, relative: usize) -> Result<usize> {
        self.rebase_bounded(id, relative, |count| relative <= count)
    }

    /// Like [`rebase`](Self::rebase), but `relative` must name an existing
    /// item of the provider.
    pub fn rebase_item(&self, id: ProviderId, relative: usize) -> Result<usize> {
        self.rebase_bounded(id, relative, |count| relative < count)
    }

    fn rebase_bounded(
        &self,
        id: ProviderId,
        relative: usize,
        in_bounds: impl FnOnce(usize) -> bool,
    ) -> Result<usize> {
        let provider = self
            .providers
            .get(id.0)
            .ok_or(AdapterError::UnregisteredProvider)?;
        let count = provider.item_count();
        if !in_bounds(count) {
            return Err(AdapterError::RelativeOutOfRange {
                provider: id,
                position: relative,
                count,
            });
        }
        let preceding: usize = self.providers[..id.0]
            .iter()
            .map(|p| p.item_count())
            .sum();
        Ok(preceding + relative)
    }
}
