// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contact classification between co-present layers.

use strata_lite_core::{ContactInterface, ContactType, LayerInfo};
use strata_lite_geometry::{angle_between_degrees, intersect_polygons};

use crate::config::DetectionConfig;

/// Classify a contact from the angle between layer normals.
///
/// Only Conformable, Disconformable and Unconformable come out of here.
pub fn classify_contact(angle_degrees: f64, config: &DetectionConfig) -> ContactType {
    if angle_degrees < config.conformable_max_angle {
        ContactType::Conformable
    } else if angle_degrees > config.unconformable_min_angle {
        ContactType::Unconformable
    } else {
        ContactType::Disconformable
    }
}

/// Contact between two layers sharing a slice.
///
/// The contact line comes from the approximate polygon intersection and may
/// be empty; the contact is still reported.
pub fn analyze_contact(a: &LayerInfo, b: &LayerInfo, config: &DetectionConfig) -> ContactInterface {
    let contact_angle = angle_between_degrees(&a.normal, &b.normal);

    ContactInterface {
        layer_a: a.layer,
        layer_b: b.layer,
        contact_line: intersect_polygons(&a.boundary_shape, &b.boundary_shape),
        contact_angle,
        contact_type: classify_contact(contact_angle, config),
        contact_normal: (a.normal + b.normal)
            .try_normalize(f64::EPSILON)
            .unwrap_or(a.normal),
    }
}

/// All pairwise contacts, in (i, j > i) order.
pub fn analyze_layer_contacts(
    layers: &[LayerInfo],
    config: &DetectionConfig,
) -> Vec<ContactInterface> {
    let mut contacts = Vec::with_capacity(layers.len() * layers.len().saturating_sub(1) / 2);
    for (i, a) in layers.iter().enumerate() {
        for b in &layers[i + 1..] {
            contacts.push(analyze_contact(a, b, config));
        }
    }
    contacts
}
