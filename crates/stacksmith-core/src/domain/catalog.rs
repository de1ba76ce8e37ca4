//! Pinned dependency catalog.
//!
//! Single source of truth mapping an npm package name to the exact version
//! spec the generator writes into manifests. The injector never invents a
//! version: a name missing from the catalog is a hard error, because a
//! silently guessed version would produce projects nobody tested.

use std::fmt;

/// One `(package name, version spec)` pin.
type Pin = (&'static str, &'static str);

/// Lexicographically sorted so lookup is a binary search. Keep it sorted
/// when adding entries; `tests::builtin_is_sorted` enforces it.
static BUILTIN_PINS: &[Pin] = &[
    ("@ai-sdk/google", "^1.2.0"),
    ("@astrojs/starlight", "^0.32.0"),
    ("@biomejs/biome", "^1.9.4"),
    ("@clerk/clerk-react", "^5.25.0"),
    ("@hono/node-server", "^1.14.0"),
    ("@libsql/client", "^0.15.0"),
    ("@orpc/client", "^1.1.0"),
    ("@orpc/server", "^1.1.0"),
    ("@polar-sh/better-auth", "^0.1.0"),
    ("@polar-sh/sdk", "^0.32.0"),
    ("@prisma/client", "^6.6.0"),
    ("@sveltejs/kit", "^2.20.0"),
    ("@tailwindcss/vite", "^4.1.0"),
    ("@tanstack/react-query", "^5.71.0"),
    ("@tanstack/react-router", "^1.114.0"),
    ("@tanstack/react-start", "^1.114.0"),
    ("@tanstack/router-plugin", "^1.114.0"),
    ("@tauri-apps/cli", "^2.4.0"),
    ("@trpc/client", "^11.0.0"),
    ("@trpc/server", "^11.0.0"),
    ("@trpc/tanstack-react-query", "^11.0.0"),
    ("@types/better-sqlite3", "^7.6.12"),
    ("@types/express", "^5.0.1"),
    ("@types/node", "^22.13.0"),
    ("@types/pg", "^8.11.0"),
    ("@types/react", "^19.0.0"),
    ("@types/react-dom", "^19.0.0"),
    ("ai", "^4.3.0"),
    ("alchemy", "^0.10.0"),
    ("astro", "^5.5.0"),
    ("better-auth", "^1.2.0"),
    ("better-sqlite3", "^11.9.0"),
    ("convex", "^1.21.0"),
    ("dotenv", "^16.4.0"),
    ("drizzle-kit", "^0.30.0"),
    ("drizzle-orm", "^0.41.0"),
    ("elysia", "^1.2.0"),
    ("expo", "~52.0.0"),
    ("express", "^5.1.0"),
    ("fastify", "^5.2.0"),
    ("hono", "^4.7.0"),
    ("husky", "^9.1.0"),
    ("lint-staged", "^15.5.0"),
    ("mongoose", "^8.13.0"),
    ("mysql2", "^3.14.0"),
    ("nativewind", "^4.1.0"),
    ("next", "^15.3.0"),
    ("nuxt", "^3.16.0"),
    ("pg", "^8.14.0"),
    ("prisma", "^6.6.0"),
    ("react", "^19.0.0"),
    ("react-dom", "^19.0.0"),
    ("react-native", "^0.78.0"),
    ("react-native-unistyles", "^2.20.0"),
    ("react-router", "^7.4.0"),
    ("solid-js", "^1.9.0"),
    ("svelte", "^5.25.0"),
    ("tailwindcss", "^4.1.0"),
    ("tsx", "^4.19.0"),
    ("turbo", "^2.4.0"),
    ("typescript", "^5.8.0"),
    ("vite", "^6.2.0"),
    ("vite-plugin-pwa", "^0.21.0"),
    ("vue", "^3.5.0"),
    ("wrangler", "^4.7.0"),
    ("zod", "^3.24.0"),
];

/// Read-only view over a pin table.
#[derive(Clone, Copy)]
pub struct DependencyCatalog {
    pins: &'static [Pin],
}

impl DependencyCatalog {
    /// The catalog shipped with the binary.
    pub fn builtin() -> Self {
        Self { pins: BUILTIN_PINS }
    }

    /// Look up the pinned version spec for a package.
    pub fn version(&self, name: &str) -> Option<&'static str> {
        self.pins
            .binary_search_by(|(pin, _)| (*pin).cmp(name))
            .ok()
            .map(|idx| self.pins[idx].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.version(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.pins.iter().copied()
    }
}

impl Default for DependencyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for DependencyCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyCatalog")
            .field("pins", &self.pins.len())
            .finish()
    }
}
