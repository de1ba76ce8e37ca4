//! The template fragments that ship with the binary.
//!
//! Every fragment carries its own inclusion predicate over the resolved
//! configuration; the composition engine in `stacksmith-core` does the
//! filtering. Fragments sharing a target path must have mutually exclusive
//! predicates, or composition fails with a path collision —
//! `tests::no_two_fragments_collide_for_any_valid_config` enumerates the
//! explicit axis matrix to guard this.
//!
//! Manifests here are deliberately skeletal: the dependency injector fills
//! in `dependencies`/`devDependencies` from the pinned catalog after
//! composition, so versions never live in template text.

use stacksmith_core::domain::{
    Addon, Api, Auth, Backend, Database, ExampleApp, Fragment, Frontend, Orm, Payments, Runtime,
    ServerDeploy, WebDeploy,
};

/// All built-in fragments.
pub fn fragments() -> Vec<Fragment> {
    let mut all = Vec::with_capacity(48);
    base(&mut all);
    addons(&mut all);
    web(&mut all);
    native(&mut all);
    server(&mut all);
    db(&mut all);
    auth(&mut all);
    api(&mut all);
    examples(&mut all);
    all
}

fn base(out: &mut Vec<Fragment>) {
    out.push(Fragment::text(
        "package.json",
        r#"{
  "name": "{{PROJECT_NAME}}",
  "private": true,
  "workspaces": ["apps/*", "packages/*"],
  "scripts": {
    "dev": "turbo dev",
    "build": "turbo build",
    "check-types": "turbo check-types"
  }
}
"#,
    ));
    out.push(Fragment::text(
        "README.md",
        r#"# {{PROJECT_NAME}}

Monorepo generated with stacksmith.

## Getting started

```sh
{{PACKAGE_MANAGER}} install
{{PKG_RUN}} dev
```
"#,
    ));
    out.push(Fragment::text(
        ".gitignore",
        "node_modules\ndist\n.turbo\n.env\n",
    ));
    out.push(Fragment::text(
        "tsconfig.json",
        r#"{
  "compilerOptions": {
    "strict": true,
    "module": "ESNext",
    "moduleResolution": "bundler",
    "target": "ES2022",
    "skipLibCheck": true
  }
}
"#,
    ));
    out.push(
        Fragment::text(
            ".env.example",
            "DATABASE_URL=\nBETTER_AUTH_SECRET=\nBETTER_AUTH_URL=http://localhost:3000\n",
        )
        .when(|c| c.has_database() || c.has_auth()),
    );
}

fn addons(out: &mut Vec<Fragment>) {
    out.push(
        Fragment::text(
            "turbo.json",
            r#"{
  "$schema": "https://turbo.build/schema.json",
  "tasks": {
    "dev": { "cache": false, "persistent": true },
    "build": { "dependsOn": ["^build"], "outputs": ["dist/**"] },
    "check-types": { "dependsOn": ["^check-types"] }
  }
}
"#,
        )
        .when(|c| c.has_addon(Addon::Turborepo)),
    );
    out.push(
        Fragment::text(
            "biome.json",
            r#"{
  "$schema": "https://biomejs.dev/schemas/1.9.4/schema.json",
  "formatter": { "enabled": true, "indentStyle": "space" },
  "linter": { "enabled": true, "rules": { "recommended": true } }
}
"#,
        )
        .when(|c| c.has_addon(Addon::Biome)),
    );
    out.push(
        Fragment::text(".husky/pre-commit", "npx lint-staged\n")
            .when(|c| c.has_addon(Addon::Husky)),
    );
    out.push(
        Fragment::text(
            "apps/docs/package.json",
            r#"{
  "name": "docs",
  "private": true,
  "scripts": { "dev": "astro dev", "build": "astro build" }
}
"#,
        )
        .when(|c| c.has_addon(Addon::Starlight)),
    );
    out.push(
        Fragment::text(
            "apps/docs/astro.config.mjs",
            r#"import { defineConfig } from 'astro/config';
import starlight from '@astrojs/starlight';

export default defineConfig({
  integrations: [starlight({ title: '{{PROJECT_NAME}}' })],
});
"#,
        )
        .when(|c| c.has_addon(Addon::Starlight)),
    );
}

fn web(out: &mut Vec<Fragment>) {
    out.push(
        Fragment::text(
            "apps/web/package.json",
            r#"{
  "name": "web",
  "private": true,
  "type": "module",
  "scripts": {
    "dev": "vite dev",
    "build": "vite build",
    "check-types": "tsc --noEmit"
  }
}
"#,
        )
        .when(|c| c.has_web_frontend() && c.web_frontend() != Some(Frontend::Next)),
    );
    out.push(
        Fragment::text(
            "apps/web/package.json",
            r#"{
  "name": "web",
  "private": true,
  "scripts": {
    "dev": "next dev",
    "build": "next build",
    "check-types": "tsc --noEmit"
  }
}
"#,
        )
        .when(|c| c.web_frontend() == Some(Frontend::Next)),
    );
    out.push(
        Fragment::text(
            "apps/web/tsconfig.json",
            r#"{
  "extends": "../../tsconfig.json",
  "include": ["src"]
}
"#,
        )
        .when(|c| c.has_web_frontend()),
    );
    out.push(
        Fragment::text(
            "apps/web/index.html",
            r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>{{PROJECT_NAME}}</title>
  </head>
  <body>
    <div id="app"></div>
    <script type="module" src="/src/main.tsx"></script>
  </body>
</html>
"#,
        )
        .when(|c| {
            matches!(
                c.web_frontend(),
                Some(Frontend::TanstackRouter | Frontend::ReactRouter | Frontend::Solid)
            )
        }),
    );
    out.push(
        Fragment::text(
            "apps/web/src/main.tsx",
            r#"import { RouterProvider, createRouter } from '@tanstack/react-router';
import ReactDOM from 'react-dom/client';
import { routeTree } from './routeTree.gen';

const router = createRouter({ routeTree });

ReactDOM.createRoot(document.getElementById('app')!).render(
  <RouterProvider router={router} />,
);
"#,
        )
        .when(|c| c.web_frontend() == Some(Frontend::TanstackRouter)),
    );
    out.push(
        Fragment::text(
            "apps/web/src/routes/index.tsx",
            r#"import { createFileRoute } from '@tanstack/react-router';

export const Route = createFileRoute('/')({
  component: () => <h1>{{PROJECT_NAME_PASCAL}}</h1>,
});
"#,
        )
        .when(|c| c.web_frontend() == Some(Frontend::TanstackRouter)),
    );
    out.push(
        Fragment::text(
            "apps/web/app/page.tsx",
            "export default function Home() {\n  return <h1>{{PROJECT_NAME_PASCAL}}</h1>;\n}\n",
        )
        .when(|c| c.web_frontend() == Some(Frontend::Next)),
    );
    out.push(
        Fragment::text(
            "apps/web/app/app.vue",
            "<template>\n  <h1>{{PROJECT_NAME_PASCAL}}</h1>\n</template>\n",
        )
        .when(|c| c.web_frontend() == Some(Frontend::Nuxt)),
    );
    out.push(
        Fragment::text(
            "apps/web/src/routes/+page.svelte",
            "<h1>{{PROJECT_NAME_PASCAL}}</h1>\n",
        )
        .when(|c| c.web_frontend() == Some(Frontend::Svelte)),
    );
    out.push(
        Fragment::text(
            "apps/web/wrangler.jsonc",
            r#"{
  "name": "{{PROJECT_NAME_KEBAB}}-web",
  "compatibility_date": "2025-04-01",
  "assets": { "directory": "./dist" }
}
"#,
        )
        .when(|c| c.web_deploy() == WebDeploy::Wrangler),
    );
    out.push(
        Fragment::text(
            "apps/web/vite.config.ts",
            r#"import { defineConfig } from 'vite';
import { VitePWA } from 'vite-plugin-pwa';

export default defineConfig({
  plugins: [VitePWA({ registerType: 'autoUpdate' })],
});
"#,
        )
        .when(|c| c.has_addon(Addon::Pwa)),
    );
    out.push(
        Fragment::text(
            "apps/web/src-tauri/tauri.conf.json",
            r#"{
  "productName": "{{PROJECT_NAME}}",
  "identifier": "com.{{PROJECT_NAME_SNAKE}}.app",
  "build": { "frontendDist": "../dist" }
}
"#,
        )
        .when(|c| c.has_addon(Addon::Tauri)),
    );
    out.push(
        Fragment::text(
            "apps/web/src/lib/convex.ts",
            "import { ConvexReactClient } from 'convex/react';\n\nexport const convex = new ConvexReactClient(import.meta.env.VITE_CONVEX_URL);\n",
        )
        .when(|c| c.backend() == Backend::Convex && c.has_web_frontend()),
    );
}

fn native(out: &mut Vec<Fragment>) {
    out.push(
        Fragment::text(
            "apps/native/package.json",
            r#"{
  "name": "native",
  "private": true,
  "main": "index.ts",
  "scripts": {
    "dev": "expo start",
    "android": "expo start --android",
    "ios": "expo start --ios"
  }
}
"#,
        )
        .when(|c| c.has_native_frontend()),
    );
    out.push(
        Fragment::text(
            "apps/native/app.json",
            r#"{
  "expo": {
    "name": "{{PROJECT_NAME}}",
    "slug": "{{PROJECT_NAME_KEBAB}}",
    "scheme": "{{PROJECT_NAME_SNAKE}}"
  }
}
"#,
        )
        .when(|c| c.has_native_frontend()),
    );
    out.push(
        Fragment::text(
            "apps/native/App.tsx",
            "import { Text, View } from 'react-native';\n\nexport default function App() {\n  return (\n    <View>\n      <Text>{{PROJECT_NAME_PASCAL}}</Text>\n    </View>\n  );\n}\n",
        )
        .when(|c| c.has_native_frontend()),
    );
}

fn server(out: &mut Vec<Fragment>) {
    out.push(
        Fragment::text(
            "apps/server/package.json",
            r#"{
  "name": "server",
  "private": true,
  "type": "module",
  "scripts": {
    "dev": "tsx watch src/index.ts",
    "build": "tsc",
    "check-types": "tsc --noEmit"
  }
}
"#,
        )
        .when(|c| c.needs_server_app() && c.runtime() != Runtime::Workers),
    );
    out.push(
        Fragment::text(
            "apps/server/package.json",
            r#"{
  "name": "server",
  "private": true,
  "type": "module",
  "scripts": {
    "dev": "wrangler dev",
    "deploy": "wrangler deploy",
    "check-types": "tsc --noEmit"
  }
}
"#,
        )
        .when(|c| c.needs_server_app() && c.runtime() == Runtime::Workers),
    );
    out.push(
        Fragment::text(
            "apps/server/tsconfig.json",
            r#"{
  "extends": "../../tsconfig.json",
  "include": ["src"]
}
"#,
        )
        .when(|c| c.needs_server_app()),
    );
    out.push(
        Fragment::text(
            "apps/server/src/index.ts",
            r#"import { Hono } from 'hono';

const app = new Hono();

app.get('/', (c) => c.text('{{PROJECT_NAME}} server'));

export default app;
"#,
        )
        .when(|c| c.backend() == Backend::Hono),
    );
    out.push(
        Fragment::text(
            "apps/server/src/index.ts",
            r#"import express from 'express';

const app = express();

app.get('/', (_req, res) => {
  res.send('{{PROJECT_NAME}} server');
});

app.listen(3000);
"#,
        )
        .when(|c| c.backend() == Backend::Express),
    );
    out.push(
        Fragment::text(
            "apps/server/src/index.ts",
            r#"import Fastify from 'fastify';

const app = Fastify();

app.get('/', async () => '{{PROJECT_NAME}} server');

app.listen({ port: 3000 });
"#,
        )
        .when(|c| c.backend() == Backend::Fastify),
    );
    out.push(
        Fragment::text(
            "apps/server/src/index.ts",
            r#"import { Elysia } from 'elysia';

new Elysia().get('/', () => '{{PROJECT_NAME}} server').listen(3000);
"#,
        )
        .when(|c| c.backend() == Backend::Elysia),
    );
    out.push(
        Fragment::text(
            "apps/server/wrangler.jsonc",
            r#"{
  "name": "{{PROJECT_NAME_KEBAB}}-server",
  "main": "src/index.ts",
  "compatibility_date": "2025-04-01"
}
"#,
        )
        .when(|c| c.server_deploy() == ServerDeploy::Wrangler),
    );
}

fn db(out: &mut Vec<Fragment>) {
    out.push(
        Fragment::text(
            "packages/db/package.json",
            r#"{
  "name": "@repo/db",
  "private": true,
  "type": "module",
  "main": "src/index.ts",
  "scripts": { "check-types": "tsc --noEmit" }
}
"#,
        )
        .when(|c| c.has_database()),
    );
    out.push(
        Fragment::text(
            "packages/db/src/index.ts",
            r#"import { drizzle } from 'drizzle-orm/libsql';

export const db = drizzle(process.env.DATABASE_URL ?? 'file:local.db');
"#,
        )
        .when(|c| c.orm() == Orm::Drizzle && c.database() == Database::Sqlite),
    );
    out.push(
        Fragment::text(
            "packages/db/src/index.ts",
            r#"import { drizzle } from 'drizzle-orm/node-postgres';

export const db = drizzle(process.env.DATABASE_URL!);
"#,
        )
        .when(|c| {
            c.orm() == Orm::Drizzle
                && matches!(c.database(), Database::Postgres | Database::Mysql)
        }),
    );
    out.push(
        Fragment::text(
            "packages/db/src/index.ts",
            r#"import { PrismaClient } from '@prisma/client';

export const db = new PrismaClient();
"#,
        )
        .when(|c| c.orm() == Orm::Prisma),
    );
    out.push(
        Fragment::text(
            "packages/db/src/index.ts",
            r#"import mongoose from 'mongoose';

export async function connect() {
  await mongoose.connect(process.env.DATABASE_URL!);
}
"#,
        )
        .when(|c| c.orm() == Orm::Mongoose),
    );
    out.push(
        Fragment::text(
            "packages/db/drizzle.config.ts",
            r#"import { defineConfig } from 'drizzle-kit';

export default defineConfig({
  schema: './src/schema.ts',
  out: './migrations',
  dialect: '{{DATABASE}}',
});
"#,
        )
        .when(|c| c.orm() == Orm::Drizzle),
    );
    out.push(
        Fragment::text(
            "packages/db/src/schema.ts",
            "// drizzle table definitions live here\nexport {};\n",
        )
        .when(|c| c.orm() == Orm::Drizzle),
    );
    out.push(
        Fragment::text(
            "packages/db/prisma/schema.prisma",
            r#"generator client {
  provider = "prisma-client-js"
}

datasource db {
  provider = "{{DATABASE}}"
  url      = env("DATABASE_URL")
}
"#,
        )
        .when(|c| c.orm() == Orm::Prisma),
    );
}

fn auth(out: &mut Vec<Fragment>) {
    out.push(
        Fragment::text(
            "packages/auth/package.json",
            r#"{
  "name": "@repo/auth",
  "private": true,
  "type": "module",
  "main": "src/index.ts",
  "scripts": { "check-types": "tsc --noEmit" }
}
"#,
        )
        .when(|c| c.auth() == Auth::BetterAuth),
    );
    out.push(
        Fragment::text(
            "packages/auth/src/index.ts",
            r#"import { betterAuth } from 'better-auth';

export const auth = betterAuth({
  secret: process.env.BETTER_AUTH_SECRET,
  baseURL: process.env.BETTER_AUTH_URL,
});
"#,
        )
        .when(|c| c.auth() == Auth::BetterAuth && c.payments() != Payments::Polar),
    );
    out.push(
        Fragment::text(
            "packages/auth/src/index.ts",
            r#"import { betterAuth } from 'better-auth';
import { polar } from '@polar-sh/better-auth';

export const auth = betterAuth({
  secret: process.env.BETTER_AUTH_SECRET,
  baseURL: process.env.BETTER_AUTH_URL,
  plugins: [polar({ accessToken: process.env.POLAR_ACCESS_TOKEN })],
});
"#,
        )
        .when(|c| c.auth() == Auth::BetterAuth && c.payments() == Payments::Polar),
    );
}

fn api(out: &mut Vec<Fragment>) {
    out.push(
        Fragment::text(
            "packages/api/package.json",
            r#"{
  "name": "@repo/api",
  "private": true,
  "type": "module",
  "main": "src/index.ts",
  "scripts": { "check-types": "tsc --noEmit" }
}
"#,
        )
        .when(|c| c.has_api()),
    );
    out.push(
        Fragment::text(
            "packages/api/src/index.ts",
            r#"import { initTRPC } from '@trpc/server';

const t = initTRPC.create();

export const router = t.router;
export const publicProcedure = t.procedure;

export const appRouter = router({});
export type AppRouter = typeof appRouter;
"#,
        )
        .when(|c| c.api() == Api::Trpc),
    );
    out.push(
        Fragment::text(
            "packages/api/src/index.ts",
            r#"import { os } from '@orpc/server';

export const appRouter = {};
export const base = os;
"#,
        )
        .when(|c| c.api() == Api::Orpc),
    );
}

fn examples(out: &mut Vec<Fragment>) {
    out.push(
        Fragment::text(
            "packages/api/src/routers/todo.ts",
            "// todo CRUD router backed by @repo/db\nexport {};\n",
        )
        .when(|c| c.has_example(ExampleApp::Todo) && c.has_api()),
    );
    out.push(
        Fragment::text(
            "apps/server/src/routes/ai.ts",
            r#"import { streamText } from 'ai';
import { google } from '@ai-sdk/google';

export function chat(prompt: string) {
  return streamText({ model: google('gemini-2.0-flash'), prompt });
}
"#,
        )
        .when(|c| c.has_example(ExampleApp::Ai) && c.needs_server_app()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use stacksmith_core::domain::{ResolveOptions, Resolver, StackSelection};

    fn resolve(selection: StackSelection) -> stacksmith_core::domain::ResolvedConfig {
        Resolver::new()
            .resolve(&selection, &ResolveOptions::default())
            .unwrap()
    }

    fn assert_no_colliding_targets(all: &[Fragment], config: &stacksmith_core::domain::ResolvedConfig) {
        let mut seen = std::collections::HashSet::new();
        for fragment in all {
            if fragment.include_if.applies(config) {
                assert!(
                    seen.insert(fragment.target.as_str()),
                    "duplicate target {} for {config:?}",
                    fragment.target
                );
            }
        }
    }

    // The semantic axes are finite, so collision freedom can be checked by
    // enumeration rather than sampling: walk the full single-frontend matrix,
    // skip selections the resolver rejects, and verify every accepted config
    // selects each target path at most once.
    #[test]
    fn no_two_fragments_collide_for_any_valid_config() {
        let all = fragments();
        let resolver = Resolver::new();
        let opts = ResolveOptions::default();
        let mut accepted = 0usize;
        for &frontend in Frontend::ALL {
            for &backend in Backend::ALL {
                for &runtime in Runtime::ALL {
                    for &database in Database::ALL {
                        for &orm in Orm::ALL {
                            for &auth in Auth::ALL {
                                for &api in Api::ALL {
                                    let selection = StackSelection {
                                        frontend: Some(vec![frontend]),
                                        backend: Some(backend),
                                        runtime: Some(runtime),
                                        database: Some(database),
                                        orm: Some(orm),
                                        auth: Some(auth),
                                        api: Some(api),
                                        ..Default::default()
                                    };
                                    let Ok(config) = resolver.resolve(&selection, &opts) else {
                                        continue;
                                    };
                                    accepted += 1;
                                    assert_no_colliding_targets(&all, &config);
                                }
                            }
                        }
                    }
                }
            }
        }
        assert!(accepted > 100, "matrix accepted only {accepted} configurations");
    }

    // Web + native frontends can be paired; the matrix above only covers
    // singletons.
    #[test]
    fn no_two_fragments_collide_with_paired_frontends() {
        let all = fragments();
        for web in [Frontend::TanstackRouter, Frontend::Next, Frontend::Nuxt] {
            for native in [Frontend::NativeNativewind, Frontend::NativeUnistyles] {
                let config = resolve(StackSelection {
                    frontend: Some(vec![web, native]),
                    ..Default::default()
                });
                assert_no_colliding_targets(&all, &config);
            }
        }
    }

    #[test]
    fn root_manifest_is_unconditional() {
        let config = resolve(StackSelection::default());
        assert!(
            fragments()
                .iter()
                .any(|f| f.target == "package.json" && f.include_if.applies(&config))
        );
    }

    #[test]
    fn every_composed_package_has_a_manifest() {
        let config = resolve(StackSelection::default());
        let targets: Vec<String> = fragments()
            .iter()
            .filter(|f| f.include_if.applies(&config))
            .map(|f| f.target.clone())
            .collect();
        for dir in ["apps/web", "apps/server", "packages/db", "packages/auth", "packages/api"] {
            assert!(
                targets.iter().any(|t| t == &format!("{dir}/package.json")),
                "{dir} composed without a manifest"
            );
        }
    }
}
