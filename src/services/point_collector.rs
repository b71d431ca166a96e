//! Reference consumer of the point channel.
//!
//! Points are pulled straight off the channel and owned by the collector;
//! there is no shared buffer between the receiving loop and its caller.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::domain::models::Point;

/// Why collection stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionEnd {
    /// Every sender was dropped and the buffer is empty.
    ChannelClosed,
    /// The host cancelled collection.
    Cancelled,
}

/// Points gathered by a [`PointCollector`], in arrival order.
#[derive(Debug, Clone)]
pub struct CollectedPoints {
    pub points: Vec<Point>,
    pub end: CollectionEnd,
}

impl CollectedPoints {
    /// Points ordered by parameter. Arrival order across points is unspecified.
    pub fn sorted(mut self) -> Vec<Point> {
        self.points
            .sort_by(|a, b| a.parameter.total_cmp(&b.parameter));
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Drains a point channel.
pub struct PointCollector {
    receiver: mpsc::Receiver<Point>,
}

impl PointCollector {
    pub const fn new(receiver: mpsc::Receiver<Point>) -> Self {
        Self { receiver }
    }

    /// Receive points until the channel closes or `cancel` fires.
    ///
    /// `on_point` sees each point as it arrives, before it is stored.
    pub async fn collect<F>(mut self, cancel: &CancellationToken, mut on_point: F) -> CollectedPoints
    where
        F: FnMut(&Point),
    {
        let mut points = Vec::new();

        let end = loop {
            tokio::select! {
                received = self.receiver.recv() => match received {
                    Some(point) => {
                        trace!(parameter = point.parameter, value = point.value, "point received");
                        on_point(&point);
                        points.push(point);
                    }
                    None => break CollectionEnd::ChannelClosed,
                },
                () = cancel.cancelled() => break CollectionEnd::Cancelled,
            }
        };

        debug!(received = points.len(), end = ?end, "point collection finished");
        CollectedPoints { points, end }
    }

    /// Take whatever is already buffered without waiting.
    pub fn drain_ready(&mut self) -> Vec<Point> {
        let mut points = Vec::new();
        while let Ok(point) = self.receiver.try_recv() {
            points.push(point);
        }
        points
    }
}
