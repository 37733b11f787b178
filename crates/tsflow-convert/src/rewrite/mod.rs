//! Library-specific rewrites of type references.
//!
//! A [`RewriteTable`] maps a name to a [`RewriteRule`]: either a macro that
//! computes a custom translation, or an import substitution that swaps the
//! reference for a type exported by a compatibility module. Tables are grouped
//! per library in a [`RewriteConfig`], built once and shared read-only by every
//! conversion.
//!
//! # Name resolution
//!
//! For a reference `A.B…` in some file:
//!
//! 1. `A` bound by `import A from 'm'` or `import * as A from 'm'`: look up
//!    `B` in the table for `m`.
//! 2. `A` bound by `import { X as A } from 'm'`: look up `X.B…` in the table
//!    for `m`.
//! 3. `A` is a library's global namespace (e.g. `React`): look up `B` in
//!    that library's table.
//! 4. Otherwise look up `A.B…` in the libraries' global tables (e.g.
//!    `JSX.Element`).
//!
//! Table lookup takes one or two segments; the second segment is only
//! searched in a nested table named by the first. After a module or namespace
//! head only a single segment remains to match, so a library's nested tables
//! are reachable from the global tables and named imports alone
//! (`React.JSX.Element` is never rewritten).

pub mod react;
pub mod react_native;

use crate::convert::{ConversionResult, Converter};
use crate::input::InputNode;
use crate::ir::{FlowType, ImportDeclaration, ImportKind, ImportSpecifier, QualifiedName};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::OnceLock;

/// Custom translation of a type reference.
///
/// Receives the converter (to translate type arguments recursively), the
/// referenced name as written, and the type arguments (`None` when written
/// without `<…>`).
pub type TypeReferenceMacro =
    fn(&mut Converter<'_>, &QualifiedName, Option<&[InputNode<'_>]>) -> ConversionResult<FlowType>;

/// What to do with a type reference that names a rewritten entity.
#[derive(Clone)]
pub enum RewriteRule {
    Macro(TypeReferenceMacro),
    ImportSubstitution(ImportSubstitution),
}

impl fmt::Debug for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteRule::Macro(_) => f.write_str("Macro"),
            RewriteRule::ImportSubstitution(subst) => {
                f.debug_tuple("ImportSubstitution").field(subst).finish()
            }
        }
    }
}

/// Replace a reference with `local_name`, imported as `import_name` from `module`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSubstitution {
    pub import_name: String,
    pub local_name: String,
    pub module: String,
}

impl ImportSubstitution {
    pub fn new(
        import_name: impl Into<String>,
        local_name: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            import_name: import_name.into(),
            local_name: local_name.into(),
            module: module.into(),
        }
    }
}

/// An import a fired substitution needs in the output file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PendingImport {
    pub module: String,
    pub import_name: String,
    pub local_name: String,
}

impl PendingImport {
    /// `import type { import_name as local_name } from 'module';`
    pub fn to_declaration(&self) -> ImportDeclaration {
        ImportDeclaration {
            kind: ImportKind::Type,
            specifiers: vec![ImportSpecifier::Named {
                imported: self.import_name.clone(),
                local: self.local_name.clone(),
                kind: None,
            }],
            source: self.module.clone(),
        }
    }
}

impl From<&ImportSubstitution> for PendingImport {
    fn from(subst: &ImportSubstitution) -> Self {
        Self {
            module: subst.module.clone(),
            import_name: subst.import_name.clone(),
            local_name: subst.local_name.clone(),
        }
    }
}

/// Name → rule, plus namespace name → nested table.
#[derive(Debug, Clone, Default)]
pub struct RewriteTable {
    rules: HashMap<String, RewriteRule>,
    namespaces: HashMap<String, RewriteTable>,
}

impl RewriteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, name: impl Into<String>, rule: RewriteRule) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    pub fn with_namespace(mut self, name: impl Into<String>, table: RewriteTable) -> Self {
        self.namespaces.insert(name.into(), table);
        self
    }

    /// Exact-match lookup of a one- or two-segment name.
    pub fn lookup<S: AsRef<str>>(&self, name: &[S]) -> Option<&RewriteRule> {
        match name {
            [only] => self.rules.get(only.as_ref()),
            [namespace, member] => self
                .namespaces
                .get(namespace.as_ref())?
                .rules
                .get(member.as_ref()),
            _ => None,
        }
    }

    /// Top-level rule of that name, never a nested one.
    pub fn get(&self, name: &str) -> Option<&RewriteRule> {
        self.rules.get(name)
    }

    /// Every rule name, nested ones as `Namespace.Name`, sorted.
    pub fn rule_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.keys().cloned().collect();
        for (namespace, table) in &self.namespaces {
            names.extend(table.rules.keys().map(|name| format!("{namespace}.{name}")));
        }
        names.sort();
        names
    }
}

/// The rewrites for one external library.
#[derive(Debug, Clone)]
pub struct RewriteLibrary {
    /// Short name used in configuration, e.g. `react`.
    pub name: String,
    /// Module specifiers whose imports resolve to `table`.
    pub modules: Vec<String>,
    /// Global namespace names that resolve to `table` without an import.
    pub namespaces: Vec<String>,
    pub table: RewriteTable,
    /// Entries the library adds to the global scope (e.g. `JSX.Element`).
    pub globals: RewriteTable,
}

/// Every built-in library, in a fixed order.
pub fn builtin_libraries() -> Vec<RewriteLibrary> {
    vec![react::library(), react_native::library()]
}

/// The set of libraries active for a run.
#[derive(Debug, Clone, Default)]
pub struct RewriteConfig {
    libraries: Vec<RewriteLibrary>,
}

static BUILTIN: OnceLock<RewriteConfig> = OnceLock::new();

impl RewriteConfig {
    /// No rewrites at all: every reference is translated structurally.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All built-in libraries, built on first use.
    pub fn builtin() -> &'static RewriteConfig {
        BUILTIN.get_or_init(|| {
            let mut config = RewriteConfig::empty();
            for library in builtin_libraries() {
                config.add_library(library);
            }
            config
        })
    }

    /// Built-in libraries selected by name. Unknown names are returned alongside.
    pub fn select<S: AsRef<str>>(names: &[S]) -> (Self, Vec<String>) {
        let mut config = RewriteConfig::empty();
        let mut unknown = Vec::new();
        let mut available = builtin_libraries();
        for name in names {
            let name = name.as_ref();
            match available.iter().position(|lib| lib.name == name) {
                Some(idx) => config.add_library(available.swap_remove(idx)),
                None if config.library(name).is_some() => {}
                None => unknown.push(name.to_string()),
            }
        }
        (config, unknown)
    }

    pub fn add_library(&mut self, library: RewriteLibrary) {
        self.libraries.push(library);
    }

    pub fn libraries(&self) -> &[RewriteLibrary] {
        &self.libraries
    }

    pub fn library(&self, name: &str) -> Option<&RewriteLibrary> {
        self.libraries.iter().find(|lib| lib.name == name)
    }

    /// Table for imports from `module`.
    pub fn module_table(&self, module: &str) -> Option<&RewriteTable> {
        self.libraries
            .iter()
            .find(|lib| lib.modules.iter().any(|m| m == module))
            .map(|lib| &lib.table)
    }

    /// Table for a global namespace such as `React`.
    pub fn namespace_table(&self, name: &str) -> Option<&RewriteTable> {
        self.libraries
            .iter()
            .find(|lib| lib.namespaces.iter().any(|ns| ns == name))
            .map(|lib| &lib.table)
    }

    /// Look a name up in the libraries' global tables.
    pub fn global_lookup<S: AsRef<str>>(&self, name: &[S]) -> Option<&RewriteRule> {
        self.libraries
            .iter()
            .find_map(|lib| lib.globals.lookup(name))
    }

    /// Find the rule, if any, for a type reference in a file with the given imports.
    pub fn resolve(&self, bindings: &ImportBindings, name: &QualifiedName) -> Option<&RewriteRule> {
        let (head, rest) = name.segments().split_first()?;

        if let Some(binding) = bindings.get(head) {
            // An import shadows globals even when its module has no table.
            let table = self.module_table(&binding.module)?;
            return match &binding.imported {
                None => single(rest).and_then(|member| table.get(member)),
                Some(imported) => {
                    let mut full = vec![imported.as_str()];
                    full.extend(rest.iter().map(String::as_str));
                    table.lookup(&full)
                }
            };
        }

        if !rest.is_empty() {
            if let Some(table) = self.namespace_table(head) {
                return single(rest).and_then(|member| table.get(member));
            }
        }

        self.global_lookup(name.segments())
    }
}

fn single(rest: &[String]) -> Option<&str> {
    match rest {
        [only] => Some(only.as_str()),
        _ => None,
    }
}

/// What a local name imported into a file refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub module: String,
    /// `None` for default and namespace imports (the module itself).
    pub imported: Option<String>,
}

/// Local names bound by the import declarations converted so far.
#[derive(Debug, Clone, Default)]
pub struct ImportBindings {
    bindings: BTreeMap<String, ImportBinding>,
}

impl ImportBindings {
    pub fn bind_module(&mut self, local: impl Into<String>, module: impl Into<String>) {
        self.bindings.insert(
            local.into(),
            ImportBinding {
                module: module.into(),
                imported: None,
            },
        );
    }

    pub fn bind_named(
        &mut self,
        local: impl Into<String>,
        imported: impl Into<String>,
        module: impl Into<String>,
    ) {
        self.bindings.insert(
            local.into(),
            ImportBinding {
                module: module.into(),
                imported: Some(imported.into()),
            },
        );
    }

    pub fn get(&self, local: &str) -> Option<&ImportBinding> {
        self.bindings.get(local)
    }
}
