// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub(crate) mod http;
pub mod netilion_client;
pub mod aas_repository_client;
pub mod token_provider;

pub use aas_repository_client::AasRepositoryClient;
pub use netilion_client::NetilionClient;
pub use token_provider::{token_provider_from_config, ClientCredentialsTokenProvider, StaticTokenProvider};
