//! Label vocabulary: what the extractor emits and what the passes produce

/// Node and edge labels read from the extractor's fact graph.
pub mod input {
    pub const DECLARATION: &str = "CppDeclaration";
    pub const FORWARD_DECLARATION: &str = "CppForwardDeclaration";
    pub const FUNCTION_DECLARATION: &str = "CppFunctionDeclaration";
    pub const FUNCTION_DEFINITION: &str = "CppFunctionDefinition";
    pub const MACRO_DEFINITION: &str = "CppMacroDefinition";
    pub const SOURCE_FILE: &str = "SourceFile";
    pub const HEADER_FILE: &str = "HeaderFile";
    pub const OTHER_FILE: &str = "OtherFile";
    pub const FOLDER: &str = "Folder";

    pub const CONTAINS: &str = "CppContains";
    pub const INHERITS: &str = "CppInherits";
    pub const ALIAS: &str = "CppAlias";
    /// definition → declaration
    pub const IMPLEMENTS: &str = "CppImplements";
    pub const CALLS: &str = "CppCalls";
    pub const USES: &str = "CppUses";
    /// entity ↔ file, either orientation
    pub const SOURCE: &str = "Source";
    /// child → folder
    pub const PARENT_FOLDER: &str = "ParentFolder";
}

/// Canonical architecture labels, edge types and `kind` values.
pub mod output {
    pub const STRUCTURE: &str = "Structure";
    pub const VARIABLE: &str = "Variable";
    pub const OPERATION: &str = "Operation";
    pub const SCRIPT: &str = "Script";
    pub const CONTAINER: &str = "Container";

    pub const HAS_VARIABLE: &str = "hasVariable";
    pub const HAS_SCRIPT: &str = "hasScript";
    pub const CONTAINS: &str = "contains";
    pub const SPECIALIZES: &str = "specializes";
    pub const INVOKE: &str = "invoke";
    pub const ASSOCIATION: &str = "association";
    pub const USES: &str = "uses";

    pub mod kind {
        pub const CLASS: &str = "class/struct/template";
        pub const VARIABLE: &str = "variable";
        pub const FIELD: &str = "field";
        pub const FUNCTION: &str = "function";
        pub const METHOD: &str = "method";
        pub const MACRO: &str = "macro";
        pub const SOURCE_FILE: &str = "source file";
        pub const HEADER_FILE: &str = "header file";
        pub const OTHER_FILE: &str = "other file";
        pub const FOLDER: &str = "folder";
    }
}
