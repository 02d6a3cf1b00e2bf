// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layer key type for arena-based storage.
//!
//! Each registered layer gets a generational key from `slotmap::SlotMap`.
//! Keys identify layers within one registry snapshot; results carry them so
//! that slices, contacts and statistics can refer to the same stratum.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a layer registered in a [`crate::LayerRegistry`] snapshot.
    pub struct LayerKey;
}
