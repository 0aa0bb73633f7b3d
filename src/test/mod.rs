mod scenario_run;
mod scenario_spec;
