use crate::models::Bar;
use std::collections::{HashMap, VecDeque};

/// Bounded FIFO of bars per symbol. The oldest bar is evicted on overflow.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    capacity: usize,
    bars: HashMap<String, VecDeque<Bar>>,
}

impl PriceHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            bars: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append `bar` and return the number of bars now held for `symbol`.
    pub fn push(&mut self, symbol: &str, bar: Bar) -> usize {
        let series = self
            .bars
            .entry(symbol.to_string())
            .or_insert_with(|| VecDeque::with_capacity(self.capacity));
        series.push_back(bar);
        while series.len() > self.capacity {
            series.pop_front();
        }
        series.len()
    }

    pub fn len(&self, symbol: &str) -> usize {
        self.bars.get(symbol).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, symbol: &str) -> bool {
        self.len(symbol) == 0
    }

    /// Contiguous oldest-to-newest view of a symbol's bars.
    pub fn bars(&mut self, symbol: &str) -> &[Bar] {
        match self.bars.get_mut(symbol) {
            Some(series) => series.make_contiguous(),
            None => &[],
        }
    }

    pub fn clear(&mut self, symbol: &str) {
        self.bars.remove(symbol);
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.bars.keys().map(String::as_str)
    }
}
