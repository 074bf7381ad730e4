// Copyright 2025 The Grim Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod types;
pub use types::*;

pub mod timer;
pub mod state;

mod menu;
pub use menu::{KeyMenu, KeyMenuItem, MenuAction, MenuCommit};

mod key;
pub use key::Key;

pub mod layout;
pub use layout::KeyboardSurface;

mod delegate;
pub use delegate::{KeyboardDelegate, KeyboardEvents};

mod controller;
pub use controller::KeyboardController;
