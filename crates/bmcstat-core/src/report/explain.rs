//! Column legend and notes on cases the analysis cannot prove.

use std::path::Path;

use crate::errors::{Result, StatsError};

/// Column name and meaning, in display order.
pub const COLUMN_EXPLANATIONS: &[(&str, &str)] = &[
    ("job_name", "The name of the benchmark"),
    ("BMC", "The total time for BMC"),
    ("AI4BMC", "The total time for AI4BMC"),
    ("total_diff", "The difference between BMC and AI4BMC (BMC - AI4BMC)"),
    ("BMC_solve_time", "The solving time on the solver for BMC"),
    ("AI4BMC_solve_time", "The solving time on the solver for AI4BMC"),
    (
        "solve_diff",
        "The difference between BMC and AI4BMC solving time (BMC_solve_time - AI4BMC_solve_time)",
    ),
    ("AbsInt_time", "The total time spent on AbsInt in AI4BMC"),
    ("AI%", "The percentage of time spent on AbsInt in AI4BMC"),
    (
        "#pp",
        "The number of dereference checks solved by the AbsInt in the original program",
    ),
    (
        "pp solved%",
        "The percentage of dereference checks solved by the AbsInt in the original program",
    ),
    (
        "#opsem",
        "The number of dereference checks solved by the AbsInt in the unrolled program",
    ),
    (
        "opsem solved%",
        "The percentage of dereference checks solved by the AbsInt in the unrolled program",
    ),
];

/// Legend lines with names padded to the longest one.
pub fn legend_lines() -> Vec<String> {
    let width = COLUMN_EXPLANATIONS
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    COLUMN_EXPLANATIONS
        .iter()
        .map(|(name, text)| format!("{name:<width$} : {text}"))
        .collect()
}

pub const HARD_CASES: &str = r#"
- array_list_swap
```c
len = nd_int();
assume(0 < len && len <= 40);
item_sz = nd_int();
assume(0 < item_sz && item_sz <= 40);
max_size = len * item_sz;
list->data = malloc();

linear

index_a = nd_int();
assume(0 <= index_a && index_a <= len);
index = index_a * item_sz; // bytes
list->data[index]
```
- hash_c_string
```c
sz = nd_int();
assume(0 < sz && sz <= 40);
alignment = 8;
size_t alloc_sz = (sz + (alignment - 1)) & ~(alignment - 1)
buf = malloc(alloc_sz);
```
- byte_cursor_trim_pred2, byte_cursor_satisfies_pred2
```c
while (trimmed.len > 0 && predicate(*(trimmed.ptr))) {
    --trimmed.len;
    ++trimmed.ptr;
}
```
- hash_string
```c
const uint32_t *k = (const uint32_t *)key;

while (length > 12)
{
    ...
    length -= 12;
    k += 3;
}
```
In crab IR the loop becomes:
```lua
_37:
    (@V_15:region(unknown),.046.i.i.i:ref) := gep_ref(@V_15:region(unknown),_38:ref);
    /* .046.i.i.i.address |-> [17, +oo] && .046.i.i.i.offset |-> [16, 16] && .046.i.i.i.size |-> [27, 64] */
    goto _39;
_39:
    goto __@bb_378,__@bb_379;
__@bb_379:
    ...
_50:
    /* .046.i.i.i.address |-> [17, +oo] && .046.i.i.i.offset |-> [16, +oo] && .046.i.i.i.size |-> [27, 64] */
    (@V_15:region(unknown),_53:ref) := gep_ref(@V_15:region(unknown),.046.i.i.i:ref + 8);
    _55 = crab_intrinsic(is_dereferenceable,@V_15:region(unknown),_53:ref,4:int64)
    goto __@bb_462,__@bb_463;
__@bb_462:
    assume(_55);
    goto _56;
_56:
    (@V_15:region(unknown),_84:ref) := gep_ref(@V_15:region(unknown),.046.i.i.i:ref + 12);
    (@V_15:region(unknown),.046.i.i.i:ref) := gep_ref(@V_15:region(unknown),_84:ref);
    /* .046.i.i.i.offset |-> [28, +oo] */
    goto _39;
```
unless we know `.046.i.i.i.offset - .046.i.i.i.size <= -8`
- hash_callback_c_str_eq
reasoning about strings is limited:
```c
sz = nd_int();
assume(0 < sz && sz <= 40);
char *str = malloc(sz);
str[sz - 1] = '\0';
idx = nd_int();
assume(0<= idx && idx < sz);
str[idx] // is_deref(str + idx, 1)
```
- array list properties are non-linear
```c
len = nd_int();
assume(0 < len && len <= 40);
item_sz = nd_int();
assume(0 < item_sz && item_sz <= 40);
current_sz = nd_int();
assume(current_sz == item_sz * len);
array_list = malloc(current_sz);
idx = nd_int();
assume(0 <= idx && idx <= len);
array_list[idx * item_sz]
```
"#;

pub fn write_explanation(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StatsError::write(path, e))?;
    }
    std::fs::write(path, HARD_CASES).map_err(|e| StatsError::write(path, e))?;
    tracing::info!(event = "explanation_written", path = %path.display());
    Ok(())
}
