//! Mock graphics backend for testing
//!
//! `MockBackend` implements [`GraphicsBackend`] without a GPU. It hands out
//! integer handles, records every call for test inspection, and performs a
//! small line-based check of GLSL sources so compile and link failures can be
//! exercised with realistic info logs.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{GraphicsBackend, StageKind, UniformValue};

/// Record of a backend call for test inspection
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateStage { kind: StageKind, stage: u32 },
    CompileStage(u32),
    DeleteStage(u32),
    CreateProgram(u32),
    AttachStage { program: u32, stage: u32 },
    DetachStage { program: u32, stage: u32 },
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    UniformLocation { program: u32, name: String },
    SetUniform {
        /// Program bound when the write happened.
        program: Option<u32>,
        location: Option<i32>,
        value: UniformValue,
    },
}

#[derive(Debug)]
struct MockStage {
    kind: StageKind,
    source: Option<String>,
    compiled: bool,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<u32>,
    /// Uniform name -> location, present once linked.
    uniforms: Option<HashMap<String, i32>>,
    values: HashMap<i32, UniformValue>,
}

#[derive(Debug, Default)]
struct MockState {
    next_handle: u32,
    stages: HashMap<u32, MockStage>,
    programs: HashMap<u32, MockProgram>,
    bound: Option<u32>,
    calls: Vec<BackendCall>,
    lookups: HashMap<String, usize>,
    stages_created: usize,
    stages_deleted: usize,
    programs_created: usize,
    programs_deleted: usize,
    invalid_deletes: usize,
    fail_next_program: bool,
}

impl MockState {
    fn alloc_handle(&mut self) -> u32 {
        // 0 is the GL "no object" name.
        self.next_handle += 1;
        self.next_handle
    }
}

/// A backend that records calls instead of touching a GPU.
///
/// Interior mutability keeps the `&self` signatures of [`GraphicsBackend`];
/// the mock is single-threaded like a real GL context.
#[derive(Debug, Default)]
pub struct MockBackend {
    state: RefCell<MockState>,
}

impl MockBackend {
    /// Create a new mock backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `create_program` call fail.
    pub fn fail_next_program_allocation(&self) {
        self.state.borrow_mut().fail_next_program = true;
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.borrow().calls.clone()
    }

    /// Clear all recorded calls (counters are kept).
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn stages_created(&self) -> usize {
        self.state.borrow().stages_created
    }

    pub fn stages_deleted(&self) -> usize {
        self.state.borrow().stages_deleted
    }

    pub fn programs_created(&self) -> usize {
        self.state.borrow().programs_created
    }

    pub fn programs_deleted(&self) -> usize {
        self.state.borrow().programs_deleted
    }

    /// Stage objects created and not yet deleted.
    pub fn live_stages(&self) -> usize {
        self.state.borrow().stages.len()
    }

    /// Program objects created and not yet deleted.
    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// Deletes issued for handles that were not alive (double frees).
    pub fn invalid_deletes(&self) -> usize {
        self.state.borrow().invalid_deletes
    }

    /// Number of `uniform_location` queries issued for `name`.
    pub fn lookup_count(&self, name: &str) -> usize {
        self.state.borrow().lookups.get(name).copied().unwrap_or(0)
    }

    /// Currently bound program.
    pub fn bound_program(&self) -> Option<u32> {
        self.state.borrow().bound
    }

    /// Last value written to uniform `name` of `program`.
    pub fn uniform_value(&self, program: u32, name: &str) -> Option<UniformValue> {
        let state = self.state.borrow();
        let prog = state.programs.get(&program)?;
        let loc = prog.uniforms.as_ref()?.get(name)?;
        prog.values.get(loc).copied()
    }

    /// Number of `SetUniform` calls recorded.
    pub fn uniform_writes(&self) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, BackendCall::SetUniform { .. }))
            .count()
    }
}

impl GraphicsBackend for MockBackend {
    type Stage = u32;
    type Program = u32;
    type UniformLocation = i32;

    fn create_stage(&self, kind: StageKind) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let stage = state.alloc_handle();
        state.stages.insert(stage, MockStage { kind, source: None, compiled: false });
        state.stages_created += 1;
        state.calls.push(BackendCall::CreateStage { kind, stage });
        Ok(stage)
    }

    fn compile_stage(&self, stage: u32, source: &str) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::CompileStage(stage));

        let Some(entry) = state.stages.get_mut(&stage) else {
            return Err(format!("error: invalid shader object {stage}"));
        };

        entry.source = Some(source.to_string());
        let result = check_glsl(source);
        entry.compiled = result.is_ok();
        result
    }

    fn delete_stage(&self, stage: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::DeleteStage(stage));
        if state.stages.remove(&stage).is_some() {
            state.stages_deleted += 1;
        } else {
            state.invalid_deletes += 1;
        }
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        if std::mem::take(&mut state.fail_next_program) {
            return Err("out of memory".to_string());
        }
        let program = state.alloc_handle();
        state.programs.insert(program, MockProgram::default());
        state.programs_created += 1;
        state.calls.push(BackendCall::CreateProgram(program));
        Ok(program)
    }

    fn attach_stage(&self, program: u32, stage: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::AttachStage { program, stage });
        if let Some(prog) = state.programs.get_mut(&program) {
            prog.attached.push(stage);
        }
    }

    fn detach_stage(&self, program: u32, stage: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::DetachStage { program, stage });
        if let Some(prog) = state.programs.get_mut(&program) {
            prog.attached.retain(|s| *s != stage);
        }
    }

    fn link_program(&self, program: u32) -> Result<(), String> {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::LinkProgram(program));

        let Some(prog) = state.programs.get(&program) else {
            return Err(format!("error: invalid program object {program}"));
        };

        let mut vertex = None;
        let mut fragment = None;
        for handle in &prog.attached {
            let Some(stage) = state.stages.get(handle) else {
                return Err(format!("error: attached shader {handle} no longer exists"));
            };
            if !stage.compiled {
                return Err(format!("error: shader {handle} has not been compiled"));
            }
            let source = stage.source.as_deref().unwrap_or_default();
            let slot = match stage.kind {
                StageKind::Vertex => &mut vertex,
                StageKind::Fragment => &mut fragment,
            };
            if slot.replace(source).is_some() {
                return Err(format!("error: more than one {} shader attached", stage.kind));
            }
        }

        let (Some(vertex), Some(fragment)) = (vertex, fragment) else {
            return Err("error: program requires a vertex and a fragment shader".to_string());
        };

        let outputs = global_declarations(vertex, "out");
        for input in global_declarations(fragment, "in") {
            if !outputs.contains(&input) {
                return Err(format!(
                    "error: fragment shader input '{input}' has no matching vertex output"
                ));
            }
        }

        let mut uniforms = HashMap::new();
        for name in global_declarations(vertex, "uniform")
            .into_iter()
            .chain(global_declarations(fragment, "uniform"))
        {
            let next = uniforms.len() as i32;
            uniforms.entry(name.to_string()).or_insert(next);
        }

        if let Some(prog) = state.programs.get_mut(&program) {
            prog.uniforms = Some(uniforms);
        }
        Ok(())
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::DeleteProgram(program));
        if state.programs.remove(&program).is_some() {
            state.programs_deleted += 1;
            if state.bound == Some(program) {
                state.bound = None;
            }
        } else {
            state.invalid_deletes += 1;
        }
    }

    fn use_program(&self, program: Option<u32>) {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::UseProgram(program));
        state.bound = program;
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<i32> {
        let mut state = self.state.borrow_mut();
        state.calls.push(BackendCall::UniformLocation {
            program,
            name: name.to_string(),
        });
        *state.lookups.entry(name.to_string()).or_default() += 1;

        state
            .programs
            .get(&program)?
            .uniforms
            .as_ref()?
            .get(name)
            .copied()
    }

    fn set_uniform(&self, location: Option<&i32>, value: &UniformValue) {
        let mut state = self.state.borrow_mut();
        let program = state.bound;
        state.calls.push(BackendCall::SetUniform {
            program,
            location: location.copied(),
            value: *value,
        });

        if let (Some(program), Some(loc)) = (program, location) {
            if let Some(prog) = state.programs.get_mut(&program) {
                prog.values.insert(*loc, *value);
            }
        }
    }
}

// ── GLSL checks ───────────────────────────────────────────────────────────

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(i) => &line[..i],
        None => line,
    }
}

/// Line-based syntax check producing Mesa-style info logs.
fn check_glsl(source: &str) -> Result<(), String> {
    let lines: Vec<&str> = source.lines().map(|l| strip_comment(l).trim()).collect();

    let Some(first) = lines.iter().find(|l| !l.is_empty()) else {
        return Err("0:0(0): error: shader source is empty".to_string());
    };
    if !first.starts_with("#version") {
        return Err("0:1(1): error: missing #version directive".to_string());
    }

    for (idx, line) in lines.iter().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.ends_with(';') || line.ends_with('{') || line.ends_with('}') {
            continue;
        }
        // Continuation of a multi-line expression or argument list.
        if line.ends_with(',') || line.ends_with('(') {
            continue;
        }
        // Function header with its brace on the following line.
        let next = lines[idx + 1..].iter().find(|l| !l.is_empty());
        if next.is_some_and(|n| n.starts_with('{')) {
            continue;
        }
        return Err(format!(
            "0:{}(1): error: syntax error, unexpected end of statement, expecting ';'",
            idx + 1
        ));
    }

    Ok(())
}

/// Names of global-scope declarations carrying `qualifier` (`in`, `out`, `uniform`).
fn global_declarations<'a>(source: &'a str, qualifier: &str) -> Vec<&'a str> {
    let mut names = Vec::new();
    let mut depth = 0i32;

    for raw in source.lines() {
        let line = strip_comment(raw).trim();

        if depth == 0 && line.ends_with(';') {
            let decl = strip_layout(line).trim_end_matches(';');
            let words: Vec<&str> = decl.split_whitespace().collect();
            if words.len() >= 3 && words.contains(&qualifier) {
                if let Some(last) = words.last() {
                    let name = last.split('[').next().unwrap_or(last);
                    names.push(name);
                }
            }
        }

        depth += line.matches('{').count() as i32;
        depth -= line.matches('}').count() as i32;
    }

    names
}

fn strip_layout(line: &str) -> &str {
    if !line.starts_with("layout") {
        return line;
    }
    match line.find(')') {
        Some(i) => line[i + 1..].trim_start(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERTEX: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
out vec3 vColor;
uniform mat4 model;
uniform mat4 view;

void main()
{
    vColor = aPos;
    gl_Position = view * model * vec4(aPos, 1.0);
}
";

    const FRAGMENT: &str = "#version 330 core
in vec3 vColor;
out vec4 FragColor;
uniform float alpha;
uniform mat4 view;

void main()
{
    FragColor = vec4(vColor, alpha);
}
";

    #[test]
    fn check_glsl_accepts_valid_source() {
        assert!(check_glsl(VERTEX).is_ok());
        assert!(check_glsl(FRAGMENT).is_ok());
    }

    #[test]
    fn check_glsl_reports_missing_semicolon_line() {
        let src = "#version 330 core\nvoid main()\n{\n    gl_Position = vec4(0.0)\n}\n";
        let log = check_glsl(src).unwrap_err();
        assert!(log.starts_with("0:4(1): error:"), "{log}");
    }

    #[test]
    fn check_glsl_requires_version() {
        let log = check_glsl("void main() {}\n").unwrap_err();
        assert!(log.contains("#version"));
    }

    #[test]
    fn check_glsl_rejects_empty() {
        assert!(check_glsl("  \n\n").unwrap_err().contains("empty"));
    }

    #[test]
    fn declarations_skip_layout_and_locals() {
        assert_eq!(global_declarations(VERTEX, "in"), vec!["aPos"]);
        assert_eq!(global_declarations(VERTEX, "out"), vec!["vColor"]);
        assert_eq!(global_declarations(VERTEX, "uniform"), vec!["model", "view"]);
        assert_eq!(global_declarations(FRAGMENT, "in"), vec!["vColor"]);
    }

    #[test]
    fn link_assigns_shared_uniform_locations_once() {
        let mock = MockBackend::new();
        let vs = mock.create_stage(StageKind::Vertex).unwrap();
        let fs = mock.create_stage(StageKind::Fragment).unwrap();
        mock.compile_stage(vs, VERTEX).unwrap();
        mock.compile_stage(fs, FRAGMENT).unwrap();
        let prog = mock.create_program().unwrap();
        mock.attach_stage(prog, vs);
        mock.attach_stage(prog, fs);
        mock.link_program(prog).unwrap();

        assert_eq!(mock.uniform_location(prog, "model"), Some(0));
        assert_eq!(mock.uniform_location(prog, "view"), Some(1));
        assert_eq!(mock.uniform_location(prog, "alpha"), Some(2));
        assert_eq!(mock.uniform_location(prog, "missing"), None);
    }

    #[test]
    fn link_rejects_unmatched_varying() {
        let mock = MockBackend::new();
        let vs = mock.create_stage(StageKind::Vertex).unwrap();
        let fs = mock.create_stage(StageKind::Fragment).unwrap();
        mock.compile_stage(vs, "#version 330 core\nvoid main()\n{\n}\n").unwrap();
        mock.compile_stage(fs, FRAGMENT).unwrap();
        let prog = mock.create_program().unwrap();
        mock.attach_stage(prog, vs);
        mock.attach_stage(prog, fs);

        let log = mock.link_program(prog).unwrap_err();
        assert!(log.contains("'vColor'"), "{log}");
    }

    #[test]
    fn double_delete_is_counted() {
        let mock = MockBackend::new();
        let prog = mock.create_program().unwrap();
        mock.delete_program(prog);
        mock.delete_program(prog);
        assert_eq!(mock.programs_deleted(), 1);
        assert_eq!(mock.invalid_deletes(), 1);
    }

    #[test]
    fn set_uniform_targets_bound_program() {
        let mock = MockBackend::new();
        let prog = mock.create_program().unwrap();
        mock.use_program(Some(prog));
        mock.set_uniform(Some(&3), &UniformValue::Float(1.0));
        mock.set_uniform(None, &UniformValue::Float(2.0));

        assert_eq!(mock.bound_program(), Some(prog));
        assert_eq!(mock.uniform_writes(), 2);
        assert!(matches!(
            mock.calls().last(),
            Some(BackendCall::SetUniform { program: Some(p), location: None, .. }) if *p == prog
        ));
    }

    #[test]
    fn program_allocation_failure_is_one_shot() {
        let mock = MockBackend::new();
        mock.fail_next_program_allocation();
        assert!(mock.create_program().is_err());
        assert!(mock.create_program().is_ok());
    }
}
