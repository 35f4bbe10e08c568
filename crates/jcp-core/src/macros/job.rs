use jcp_model::{ExecSystem, JobDescriptor};
use tracing::debug;

use crate::macros::{Definitions, MacroError, MacroResolver};

/// Build the standard definitions mapping for `job` running on `system`.
///
/// Directory entries are added only when set on the job, and are added in
/// their unresolved form so they can reference each other.
pub fn job_macros(job: &JobDescriptor, system: &ExecSystem) -> Definitions {
    let mut defs = Definitions::new();
    let mut put = |k: &str, v: &str| {
        defs.insert(k.to_string(), v.to_string());
    };

    put("_jobUUID", &job.uuid);
    put("_jobName", &job.name);
    put("_jobOwner", &job.owner);
    put("_jobTenant", &job.tenant);
    put("_appId", &job.app_id);
    put("_appVersion", &job.app_version);
    put("_execSystemId", &system.id);
    put("_execSystemHost", &system.host);
    put("_execSystemRootDir", &system.root_dir);
    put("_effectiveUserId", &system.effective_user);

    for (name, dir) in [
        ("_execSystemExecDir", &job.exec_system_exec_dir),
        ("_execSystemInputDir", &job.exec_system_input_dir),
        ("_execSystemOutputDir", &job.exec_system_output_dir),
    ] {
        if !dir.is_empty() {
            put(name, dir);
        }
    }
    defs
}

/// Strictly resolve the job's exec, input and output directories in place.
///
/// On error the job is left untouched.
pub fn resolve_job_dirs(job: &mut JobDescriptor, system: &ExecSystem) -> Result<(), MacroError> {
    let defs = job_macros(job, system);
    let resolver = MacroResolver::new(&defs);

    let exec = resolver.resolve(&job.exec_system_exec_dir)?;
    let input = resolver.resolve(&job.exec_system_input_dir)?;
    let output = resolver.resolve(&job.exec_system_output_dir)?;

    debug!(job = %job.uuid, exec_dir = %exec, input_dir = %input, output_dir = %output, "job directories resolved");
    job.exec_system_exec_dir = exec;
    job.exec_system_input_dir = input;
    job.exec_system_output_dir = output;
    Ok(())
}
