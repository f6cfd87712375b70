//! Class and function scopes for implicit member qualification.
//!
//! Scopes are filled as a side effect of emission order: a property or
//! method becomes visible when its declaration is emitted, so a reference
//! that precedes the declaration in source order is not qualified.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::member_index::MemberIndex;

/// Parameters and locals of one function or method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    pub params: Vec<String>,
    pub locals: Vec<String>,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionInfo {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether `name` is bound by this function itself.
    pub fn binds(&self, name: &str) -> bool {
        self.params.iter().any(|p| p == name) || self.locals.iter().any(|l| l == name)
    }
}

/// Members of the class currently being emitted, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ClassInfo {
    pub name: String,
    pub super_class: Option<String>,
    pub properties: Vec<String>,
    pub methods: FxHashMap<String, FunctionInfo>,
    pub static_members: FxHashSet<String>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, super_class: Option<String>) -> Self {
        ClassInfo {
            name: name.into(),
            super_class,
            ..Default::default()
        }
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.methods.contains_key(name) || self.properties.iter().any(|p| p == name)
    }
}

#[derive(Debug, Default)]
struct Scope {
    class: Option<ClassInfo>,
    functions: Vec<FunctionFrame>,
    in_member_body: bool,
}

#[derive(Debug)]
struct FunctionFrame {
    info: FunctionInfo,
    is_method: bool,
}

/// Tracks the class and function being emitted.
///
/// A scope is opened per class so that a class expression nested inside a
/// method sees only its own members; the root scope has no class.
#[derive(Debug)]
pub struct ScopeResolver {
    scopes: Vec<Scope>,
}

impl Default for ScopeResolver {
    fn default() -> Self {
        ScopeResolver::new()
    }
}

impl ScopeResolver {
    pub fn new() -> Self {
        ScopeResolver {
            scopes: vec![Scope::default()],
        }
    }

    fn top(&self) -> &Scope {
        // The root scope is never popped.
        &self.scopes[self.scopes.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub fn enter_class(&mut self, name: impl Into<String>, super_class: Option<String>) {
        self.scopes.push(Scope {
            class: Some(ClassInfo::new(name, super_class)),
            functions: Vec::new(),
            in_member_body: false,
        });
    }

    pub fn exit_class(&mut self) -> Option<ClassInfo> {
        if self.scopes.len() <= 1 {
            return None;
        }
        self.scopes.pop().and_then(|scope| scope.class)
    }

    pub fn current_class(&self) -> Option<&ClassInfo> {
        self.top().class.as_ref()
    }

    pub fn current_function(&self) -> Option<&FunctionInfo> {
        self.top().functions.last().map(|frame| &frame.info)
    }

    pub fn declare_property(&mut self, name: &str, is_static: bool) {
        if let Some(class) = self.top_mut().class.as_mut() {
            class.properties.push(name.to_string());
            if is_static {
                class.static_members.insert(name.to_string());
            }
        }
    }

    /// Open a function frame. A method is registered with the class right
    /// away, so its own body already sees it.
    pub fn enter_function(&mut self, name: &str, is_method: bool, is_static: bool) {
        let scope = self.top_mut();
        let is_method = is_method && scope.class.is_some();
        if is_method && let Some(class) = scope.class.as_mut() {
            class
                .methods
                .insert(name.to_string(), FunctionInfo::new(name));
            if is_static {
                class.static_members.insert(name.to_string());
            }
        }
        scope.functions.push(FunctionFrame {
            info: FunctionInfo::new(name),
            is_method,
        });
    }

    pub fn exit_function(&mut self) -> Option<FunctionInfo> {
        let scope = self.top_mut();
        let frame = scope.functions.pop()?;
        if frame.is_method
            && let Some(class) = scope.class.as_mut()
        {
            class
                .methods
                .insert(frame.info.name.clone(), frame.info.clone());
        }
        Some(frame.info)
    }

    pub fn declare_param(&mut self, name: &str) {
        if let Some(frame) = self.top_mut().functions.last_mut() {
            frame.info.params.push(name.to_string());
        }
    }

    pub fn declare_local(&mut self, name: &str) {
        if let Some(frame) = self.top_mut().functions.last_mut() {
            frame.info.locals.push(name.to_string());
        }
    }

    /// Mark whether emission is inside a method or constructor body.
    /// Returns the previous setting so callers can restore it.
    pub fn set_member_body(&mut self, active: bool) -> bool {
        std::mem::replace(&mut self.top_mut().in_member_body, active)
    }

    pub fn in_member_body(&self) -> bool {
        self.top().in_member_body
    }

    /// The receiver prefix a bare reference to `name` needs, if any:
    /// `this.` for instance members (own, or inherited through `index`) and
    /// `<Class>.` for static ones.
    pub fn qualifier(&self, name: &str, index: Option<&MemberIndex>) -> Option<String> {
        let scope = self.top();
        if !scope.in_member_body || scope.functions.is_empty() {
            return None;
        }
        let class = scope.class.as_ref()?;
        if scope.functions.iter().any(|frame| frame.info.binds(name)) {
            return None;
        }
        if class.static_members.contains(name) {
            return Some(format!("{}.", class.name));
        }
        if class.has_member(name) {
            return Some("this.".to_string());
        }
        let inherited = match (index, class.super_class.as_deref()) {
            (Some(index), Some(super_class)) => index.has_inherited_member(super_class, name),
            _ => false,
        };
        inherited.then(|| "this.".to_string())
    }
}
