// SPDX-License-Identifier: AGPL-3.0-or-later

//! User roles for authorization.

use serde::{Deserialize, Serialize};

/// Coarse-grained permission tag carried in access tokens.
///
/// ## Roles
///
/// - `Admin` - Full access, including user management
/// - `Recrutador` - Recruiter, manages job postings
/// - `Candidato` - Candidate, applies to job postings
///
/// A user holds exactly one role. Authorization gates accept sets of
/// permitted roles, so new roles can be added without touching call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Recruiter (owns job postings)
    Recrutador,
    /// Candidate (owns applications)
    Candidato,
}

impl Role {
    /// Parse a role from its claim representation (case-insensitive).
    ///
    /// Accepts an optional `ROLE_` prefix so tokens minted by older
    /// deployments still parse.
    pub fn parse(s: &str) -> Option<Role> {
        let s = s.trim();
        let s = s.strip_prefix("ROLE_").unwrap_or(s);
        match s.to_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "RECRUTADOR" => Some(Role::Recrutador),
            "CANDIDATO" => Some(Role::Candidato),
            _ => None,
        }
    }

    /// Parse a comma-joined roles claim into a typed set.
    ///
    /// Unknown tags are dropped rather than failing the whole claim; a
    /// token carrying only unknown roles authorizes nothing.
    pub fn parse_list(claim: &str) -> Vec<Role> {
        claim.split(',').filter_map(Role::parse).collect()
    }

    /// Join roles back into the comma-separated claim representation.
    pub fn join(roles: &[Role]) -> String {
        roles
            .iter()
            .map(Role::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Recrutador => write!(f, "RECRUTADOR"),
            Role::Candidato => write!(f, "CANDIDATO"),
        }
    }
}
