//! Tick notifications for registered observers.

use serde::{Deserialize, Serialize};

/// Summary of one completed tick
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Frame number after the tick
    pub frame: u64,
    pub fish: usize,
    pub sharks: usize,
    pub drifters: usize,
    pub plankton_patches: usize,
    /// Fish born this tick (reproduction and population floor)
    pub births: usize,
    /// Fish that starved this tick
    pub deaths: usize,
    /// Fish caught by the fisherman this tick
    pub caught: usize,
}

/// Receives a report after every tick
pub trait OceanObserver: Send {
    fn on_tick(&mut self, report: &TickReport);
}

impl<F> OceanObserver for F
where
    F: FnMut(&TickReport) + Send,
{
    fn on_tick(&mut self, report: &TickReport) {
        self(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer() {
        let mut frames = Vec::new();
        {
            let mut observer = |r: &TickReport| frames.push(r.frame);
            observer.on_tick(&TickReport { frame: 7, ..Default::default() });
        }
        assert_eq!(frames, vec![7]);
    }
}
