//! Compiler and linker invocation.
//!
//! Command lines are assembled per compiler family (gcc/clang flags vs
//! MSVC flags), run synchronously with captured stderr, and mapped onto
//! [`ToolchainError`] by exit status. No timeout: a hung toolchain is out
//! of scope.

use std::path::{Path, PathBuf};
use std::process::Command;

use accelbuild_spec::platform::CompilerFamily;

use crate::compiler::ResolvedCompiler;
use crate::error::{ToolchainError, ToolchainResult};

/// Compiles one C source file into an object file.
pub fn compile_object(
    compiler: &ResolvedCompiler,
    source: &Path,
    include_dirs: &[PathBuf],
    cflags: &[String],
    out_obj: &Path,
) -> ToolchainResult<()> {
    let mut cmd = Command::new(&compiler.path);
    match compiler.family {
        CompilerFamily::Msvc => {
            cmd.arg("/nologo").arg("/c");
            for dir in include_dirs {
                cmd.arg(format!("/I{}", dir.display()));
            }
            cmd.args(cflags);
            cmd.arg(source);
            cmd.arg(format!("/Fo{}", out_obj.display()));
        }
        _ => {
            cmd.arg("-c").arg("-fPIC");
            for dir in include_dirs {
                cmd.arg("-I").arg(dir);
            }
            cmd.args(cflags);
            cmd.arg(source).arg("-o").arg(out_obj);
        }
    }

    let (exit_code, stderr) = run_captured(&mut cmd)?;
    if exit_code != 0 {
        return Err(ToolchainError::compile_failed(source, exit_code, stderr));
    }
    Ok(())
}

/// Links object files into a loadable shared module.
pub fn link_module(
    compiler: &ResolvedCompiler,
    module_name: &str,
    objects: &[PathBuf],
    out_path: &Path,
) -> ToolchainResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut cmd = Command::new(&compiler.path);
    match compiler.family {
        CompilerFamily::Msvc => {
            cmd.arg("/nologo").arg("/LD");
            cmd.args(objects);
            cmd.arg(format!("/Fe{}", out_path.display()));
        }
        _ => {
            cmd.arg("-shared");
            cmd.args(objects);
            cmd.arg("-o").arg(out_path);
        }
    }

    let (exit_code, stderr) = run_captured(&mut cmd)?;
    if exit_code != 0 {
        return Err(ToolchainError::link_failed(module_name, exit_code, stderr));
    }
    Ok(())
}

// Runs the command, returning (exit_code, stderr). Spawn failure is a
// distinct error so classification can tell "compiler missing/broken" from
// "compiler diagnosed the source".
fn run_captured(cmd: &mut Command) -> ToolchainResult<(i32, String)> {
    let output = cmd.output().map_err(ToolchainError::SpawnFailed)?;
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Ok((output.status.code().unwrap_or(-1), stderr))
}
