//! Minimal compiler IR consumed by the heat printers.
//!
//! A `Module` is deserialized from JSON produced by the host compiler:
//! functions, named basic blocks with instruction text, terminators and
//! per-block call sites. Profile counters are optional everywhere.

use serde::Deserialize;

/// A whole translation unit.
#[derive(Debug, Clone, Deserialize)]
pub struct Module {
    /// Module identifier, used in the call graph output filename.
    pub name: String,
    pub functions: Vec<Function>,
}

/// A function definition or declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct Function {
    pub name: String,
    /// Empty for declarations. Block 0 is the entry block.
    #[serde(default)]
    pub blocks: Vec<BasicBlock>,
    /// Profiled entry execution count, when the module was profiled.
    #[serde(default)]
    pub entry_count: Option<u64>,
}

/// A basic block: straight-line instructions plus one terminator.
#[derive(Debug, Clone, Deserialize)]
pub struct BasicBlock {
    /// May be empty; display falls back to the block index.
    #[serde(default)]
    pub name: String,
    /// Instruction text, one line per instruction.
    #[serde(default)]
    pub insts: Vec<String>,
    /// Profiled execution count for this block.
    #[serde(default)]
    pub profile_count: Option<u64>,
    pub terminator: Terminator,
    /// Names of functions called from this block, one entry per call site.
    #[serde(default)]
    pub calls: Vec<String>,
}

/// Block terminator. Successor order is significant: a conditional
/// branch lists the taken target first, a switch lists the default first.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Terminator {
    Ret,
    Jump {
        target: String,
    },
    Branch {
        then_target: String,
        else_target: String,
        /// Raw branch-weight metadata, mirroring the host compiler's
        /// `!prof` node: `["branch_weights", w0, w1, ...]`. Kept untyped
        /// so malformed metadata degrades to "no label" instead of a
        /// deserialization failure.
        #[serde(default)]
        prof: Option<serde_json::Value>,
    },
    Switch {
        default: String,
        #[serde(default)]
        cases: Vec<SwitchCase>,
        #[serde(default)]
        prof: Option<serde_json::Value>,
    },
}

/// One arm of a switch terminator.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchCase {
    pub value: i64,
    pub target: String,
}

impl Module {
    /// Index of a defined or declared function by name.
    pub fn function_index(&self, name: &str) -> Option<usize> {
        self.functions.iter().position(|f| f.name == name)
    }

    /// True when any function in the module carries profiling metadata.
    /// Decides the frequency source once per module, so profiled and
    /// heuristic counts are never mixed within a rendering pass.
    pub fn has_profile_data(&self) -> bool {
        self.functions.iter().any(|f| {
            f.entry_count.is_some() || f.blocks.iter().any(|b| b.profile_count.is_some())
        })
    }
}

impl Function {
    /// A declaration contributes no blocks and is skipped when rendering
    /// CFGs and computing frequency ceilings.
    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block_index(&self, name: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.name == name)
    }
}

impl BasicBlock {
    /// Block name, or an operand-style `%N` fallback when unnamed.
    pub fn display_name(&self, index: usize) -> String {
        if self.name.is_empty() {
            format!("%{}", index)
        } else {
            self.name.clone()
        }
    }
}

impl Terminator {
    /// Successor target names in terminator order.
    pub fn successors(&self) -> Vec<&str> {
        match self {
            Terminator::Ret => vec![],
            Terminator::Jump { target } => vec![target.as_str()],
            Terminator::Branch {
                then_target,
                else_target,
                ..
            } => vec![then_target.as_str(), else_target.as_str()],
            Terminator::Switch { default, cases, .. } => {
                let mut targets = vec![default.as_str()];
                targets.extend(cases.iter().map(|c| c.target.as_str()));
                targets
            }
        }
    }

    fn prof(&self) -> Option<&serde_json::Value> {
        match self {
            Terminator::Branch { prof, .. } | Terminator::Switch { prof, .. } => prof.as_ref(),
            _ => None,
        }
    }

    /// Raw profiling weight for the successor at `succ_index`.
    ///
    /// The metadata must be an array tagged `"branch_weights"` with one
    /// unsigned integer per successor; any other shape (wrong tag,
    /// missing operand, non-integer value) yields `None` and the edge
    /// simply goes unlabeled.
    pub fn raw_weight(&self, succ_index: usize) -> Option<u64> {
        let node = self.prof()?.as_array()?;
        if node.first()?.as_str()? != "branch_weights" {
            return None;
        }
        node.get(succ_index + 1)?.as_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn branch_with(prof: serde_json::Value) -> Terminator {
        Terminator::Branch {
            then_target: "then".to_string(),
            else_target: "else".to_string(),
            prof: Some(prof),
        }
    }

    #[test]
    fn test_raw_weight_well_formed() {
        let term = branch_with(json!(["branch_weights", 90, 10]));
        assert_eq!(term.raw_weight(0), Some(90));
        assert_eq!(term.raw_weight(1), Some(10));
    }

    #[test]
    fn test_raw_weight_malformed_shapes() {
        // Wrong tag
        let term = branch_with(json!(["unexpected", 90, 10]));
        assert_eq!(term.raw_weight(0), None);
        // Missing operand
        let term = branch_with(json!(["branch_weights", 90]));
        assert_eq!(term.raw_weight(1), None);
        // Non-integer value
        let term = branch_with(json!(["branch_weights", "ninety", 10]));
        assert_eq!(term.raw_weight(0), None);
        // Not an array at all
        let term = branch_with(json!({"tag": "branch_weights"}));
        assert_eq!(term.raw_weight(0), None);
    }

    #[test]
    fn test_successor_order() {
        let term = Terminator::Switch {
            default: "exit".to_string(),
            cases: vec![
                SwitchCase {
                    value: 1,
                    target: "one".to_string(),
                },
                SwitchCase {
                    value: 2,
                    target: "two".to_string(),
                },
            ],
            prof: None,
        };
        assert_eq!(term.successors(), vec!["exit", "one", "two"]);
    }

    #[test]
    fn test_module_deserializes_from_json() {
        let src = r#"{
            "name": "demo.bc",
            "functions": [
                {
                    "name": "main",
                    "blocks": [
                        {
                            "name": "entry",
                            "insts": ["%x = call i32 @helper()"],
                            "profile_count": 100,
                            "terminator": {"kind": "ret"},
                            "calls": ["helper"]
                        }
                    ]
                },
                {"name": "helper"}
            ]
        }"#;
        let module: Module = serde_json::from_str(src).unwrap();
        assert_eq!(module.functions.len(), 2);
        assert!(!module.functions[0].is_declaration());
        assert!(module.functions[1].is_declaration());
        assert!(module.has_profile_data());
        assert_eq!(module.function_index("helper"), Some(1));
    }
}
