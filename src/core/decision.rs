/// What to do with a freshly extracted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing stored yet for the item.
    FirstRun,
    Unchanged,
    /// Price changed and no boundary is configured.
    NotifyDrop,
    /// Price changed and is below the boundary.
    NotifyBoundary,
    /// Price changed but is still at or above the boundary.
    SuppressedAboveBoundary,
}

impl Decision {
    pub fn should_notify(self) -> bool {
        matches!(self, Decision::NotifyDrop | Decision::NotifyBoundary)
    }
}

/// Compare the new price against the stored one.
///
/// Without a boundary every change notifies, increases included. With a
/// boundary the only question is whether the new price is below it, so an
/// increase that stays under the boundary notifies too.
pub fn decide(previous: Option<f64>, current: f64, boundary: Option<f64>) -> Decision {
    let Some(previous) = previous else {
        return Decision::FirstRun;
    };

    if current == previous {
        return Decision::Unchanged;
    }

    match boundary {
        None => Decision::NotifyDrop,
        Some(boundary) if current < boundary => Decision::NotifyBoundary,
        Some(_) => Decision::SuppressedAboveBoundary,
    }
}
