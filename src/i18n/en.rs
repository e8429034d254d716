use crate::tr;

// Pipeline
tr!(STARTING_RUN, "Packaging `{}`...");
tr!(STARTING_CLEAN, "Cleaning `{}`...");
tr!(STEP, "Step");
tr!(DONE, " done");
tr!(GOT_ERROR, " got an error!");
tr!(GOT_WARNING, " failed, continuing");
tr!(WARNING, "Warning");
tr!(ERROR, "Error");

// Steps
tr!(STEP_CLEAN, "Clean");
tr!(STEP_ARCHIVE_MAIN, "Archive");
tr!(STEP_ARCHIVE_COPY, "Archive copy");

// Clean
tr!(CLEAN_REMOVED, "Removed");
tr!(CLEAN_NOTHING, "Nothing to clean");
tr!(CLEAN_CANT_REMOVE, "Can't remove");

// Archive
tr!(ARCHIVE_ENTRIES, "Entries written");
tr!(ARCHIVE_PATH, "Archive path");
tr!(ARCHIVE_EMPTY, "no files match the include patterns");

// Paths
tr!(CONTEXT_CI, "CI build");
tr!(CONTEXT_LOCAL, "Local build");
tr!(CONTEXT_JOB, "Job name");
tr!(CONTEXT_BUILD, "Build number");
tr!(CONTEXT_DATE, "Date");
tr!(MAIN_TARGET, "Main archive");
tr!(COPY_TARGET, "Copy archive");

// Options
tr!(OPTIONS_LOADED, "Options are loaded from");
tr!(OPTIONS_DEFAULT, "Options file not found, using defaults");
