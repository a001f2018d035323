// Copyright (c) 2025 Pocketbook Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Entity repositories: thin CRUD over the store handle. Lookups return
//! `Option`/`bool` sentinels for missing ids; callers branch on those
//! rather than catching errors.

pub mod budgets;
pub mod categories;
pub mod notifications;
pub mod transactions;
pub mod users;
pub mod wallets;
