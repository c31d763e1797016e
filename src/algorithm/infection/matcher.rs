//! Pairing of administrations with culture specimens
//!
//! Each eligible administration binds to at most one specimen. Any specimen
//! in the "before" partition wins over every "after" specimen; inside a
//! partition the earliest specimen is chosen. A specimen may be bound to any
//! number of administrations.

use log::debug;

use crate::config::MatchWindow;
use crate::models::events::{AdministrationEvent, SpecimenEvent};

use super::window::{Partition, WindowPosition, classify};
use super::{InfectionMatch, MatchDirection, MatchedPair};

/// Find the specimen bound to one administration, if any
#[must_use]
pub fn match_administration(
    administration: &AdministrationEvent,
    specimens: &[SpecimenEvent],
    window: &MatchWindow,
) -> Option<MatchedPair> {
    if !administration.route.is_eligible() {
        debug!(
            "Administration {} is not tagged systemic; skipping",
            administration.id
        );
        return None;
    }

    let candidates = || {
        specimens
            .iter()
            .filter(|specimen| specimen.encounter_id == administration.encounter_id)
            .filter_map(|specimen| {
                classify(administration.start, specimen.time, window)
                    .map(|position| (specimen, position))
            })
    };

    let earliest_in = |partition: Partition| {
        candidates()
            .filter(|(_, position)| position.partition == partition)
            .min_by_key(|(specimen, _)| (specimen.time, specimen.id))
    };

    let (specimen, position) = earliest_in(Partition::Before).or_else(|| earliest_in(Partition::After))?;
    Some(build_pair(administration, specimen, position))
}

fn build_pair(
    administration: &AdministrationEvent,
    specimen: &SpecimenEvent,
    position: WindowPosition,
) -> MatchedPair {
    MatchedPair {
        administration_id: administration.id,
        encounter_id: administration.encounter_id,
        administration_time: administration.start,
        specimen_id: specimen.id,
        specimen_time: specimen.time,
        specimen_polarity: specimen.polarity,
        direction: match position.partition {
            Partition::Before => MatchDirection::Before,
            Partition::After => MatchDirection::After,
        },
        offset: position.offset,
        day_granularity: position.day_granularity,
    }
}

/// Match every administration of an encounter independently
///
/// One result per administration, in input order, including those that are
/// ineligible or found no specimen.
#[must_use]
pub fn match_encounter(
    administrations: &[AdministrationEvent],
    specimens: &[SpecimenEvent],
    window: &MatchWindow,
) -> Vec<InfectionMatch> {
    administrations
        .iter()
        .map(|administration| InfectionMatch {
            administration_id: administration.id,
            encounter_id: administration.encounter_id,
            administration_time: administration.start,
            eligible: administration.route.is_eligible(),
            pair: match_administration(administration, specimens, window),
        })
        .collect()
}
