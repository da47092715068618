//! Buffered `(geometry, properties)` records for batched I/O.

use std::collections::VecDeque;

use crate::error::{GeomError, GeomResult};
use crate::model::Geometry;

/// A geometry with an attached integer property array.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    geometry: Geometry,
    props: Vec<i32>,
}

impl Record {
    pub fn new(geometry: Geometry, props: Vec<i32>) -> Self {
        Self { geometry, props }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn props(&self) -> &[i32] {
        &self.props
    }

    pub fn prop(&self, index: usize) -> GeomResult<i32> {
        self.props.get(index).copied().ok_or(GeomError::Index {
            index,
            count: self.props.len(),
        })
    }

    pub fn into_parts(self) -> (Geometry, Vec<i32>) {
        (self.geometry, self.props)
    }
}

/// FIFO of records. A reader is bounded, a writer grows freely.
#[derive(Clone, Debug, Default)]
pub struct RecordBuffer {
    records: VecDeque<Record>,
    capacity: Option<usize>,
}

impl RecordBuffer {
    /// Bounded buffer holding at most `capacity` records.
    pub fn reader(capacity: usize) -> GeomResult<Self> {
        if capacity == 0 {
            return Err(GeomError::InvalidArgument(
                "reader capacity must be positive".into(),
            ));
        }
        Ok(Self {
            records: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        })
    }

    pub fn writer() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|c| self.records.len() >= c)
    }

    /// Append a record; fails when a bounded buffer is full.
    pub fn push(&mut self, geometry: Geometry, props: Vec<i32>) -> GeomResult<()> {
        if self.is_full() {
            return Err(GeomError::InvalidArgument(format!(
                "record buffer full ({} records)",
                self.records.len()
            )));
        }
        self.records.push_back(Record::new(geometry, props));
        Ok(())
    }

    /// Oldest record first.
    pub fn pop(&mut self) -> Option<Record> {
        self.records.pop_front()
    }

    /// Take every buffered record in order.
    pub fn drain(&mut self) -> impl Iterator<Item = Record> + '_ {
        self.records.drain(..)
    }
}
