//! Auxiliary TypeScript vocabulary referenced by the rewritten signatures.
//!
//! Emitted once per pass and appended to the patched declaration file. The block
//! is static except for the namespace identifier.

const NAMESPACE_PLACEHOLDER: &str = "__NAMESPACE__";

const UTILITY_TYPES: &str = r#"
declare global {
  namespace __NAMESPACE__ {}
}

/** A filter to be used against nullable List types. */
export type NullableListFilter<T> = {
  equals?: T | T[] | null;
  has?: T | null;
  hasEvery?: T | T[];
  hasSome?: T | T[];
  isEmpty?: boolean;
};

/** A type to determine how to update a json field */
export type UpdateInput<T> = T extends object
  ? {
      [P in keyof T]?: UpdateInput<T[P]>;
    }
  : T;

/** A type to determine how to update a json[] field */
export type UpdateManyInput<T> =
  | T
  | T[]
  | {
      set?: T | T[];
      push?: T | T[];
    };

/** A type to determine how to create a json[] input */
export type CreateManyInput<T> =
  | T
  | T[]
  | {
      set?: T | T[];
    };

/**
 * A typed version of NestedStringFilter, allowing narrowing of string types to
 * discriminated unions.
 */
export type TypedNestedStringFilter<S extends string> =
  //@ts-ignore - When Prisma.StringFilter is not present, this type is not used
  Prisma.StringFilter & {
    equals?: S;
    in?: S | S[];
    notIn?: S | S[];
    not: TypedNestedStringFilter<S> | S;
  };

/**
 * A typed version of StringFilter, allowing narrowing of string types to discriminated
 * unions.
 */
export type TypedStringFilter<S extends string> =
  //@ts-ignore - When Prisma.StringFilter is not present, this type is not used
  Prisma.StringFilter & {
    equals?: S;
    in?: S | S[];
    notIn?: S | S[];
    not: TypedNestedStringFilter<S> | S;
  };

/**
 * A typed version of NestedStringNullableFilter, allowing narrowing of string types to
 * discriminated unions.
 */
export type TypedNestedStringNullableFilter<S extends string> =
  //@ts-ignore - When Prisma.StringNullableFilter is not present, this type is not used
  Prisma.StringNullableFilter & {
    equals?: S | null;
    in?: S | S[] | null;
    notIn?: S | S[] | null;
    not: TypedNestedStringNullableFilter<S> | S | null;
  };

/**
 * A typed version of StringNullableFilter, allowing narrowing of string types to
 * discriminated unions.
 */
export type TypedStringNullableFilter<S extends string> =
  //@ts-ignore - When Prisma.StringNullableFilter is not present, this type is not used
  Prisma.StringNullableFilter & {
    equals?: S | null;
    in?: S | S[] | null;
    notIn?: S | S[] | null;
    not: TypedNestedStringNullableFilter<S> | S | null;
  };

/**
 * A typed version of NestedStringWithAggregatesFilter, allowing narrowing of string types
 * to discriminated unions.
 */
export type TypedNestedStringWithAggregatesFilter<S extends string> =
  //@ts-ignore - When Prisma.NestedStringWithAggregatesFilter is not present, this type is not used
  Prisma.NestedStringWithAggregatesFilter & {
    equals?: S;
    in?: S | S[];
    notIn?: S | S[];
    not: TypedNestedStringWithAggregatesFilter<S> | S;
  };

/**
 * A typed version of StringWithAggregatesFilter, allowing narrowing of string types to
 * discriminated unions.
 */
export type TypedStringWithAggregatesFilter<S extends string> =
  //@ts-ignore - When Prisma.StringWithAggregatesFilter is not present, this type is not used
  Prisma.StringWithAggregatesFilter & {
    equals?: S;
    in?: S | S[];
    notIn?: S | S[];
    not?: TypedNestedStringWithAggregatesFilter<S> | S;
  };

/**
 * A typed version of NestedStringNullableWithAggregatesFilter, allowing narrowing of
 * string types to discriminated unions.
 */
export type TypedNestedStringNullableWithAggregatesFilter<S extends string> =
  //@ts-ignore - When Prisma.NestedStringNullableWithAggregatesFilter is not present, this type is not used
  Prisma.NestedStringNullableWithAggregatesFilter & {
    equals?: S | null;
    in?: S | S[] | null;
    notIn?: S | S[] | null;
    not: TypedNestedStringNullableWithAggregatesFilter<S> | S | null;
  };

/**
 * A typed version of StringNullableWithAggregatesFilter, allowing narrowing of string
 * types to discriminated unions.
 */
export type TypedStringNullableWithAggregatesFilter<S extends string> =
  //@ts-ignore - When Prisma.StringNullableWithAggregatesFilter is not present, this type is not used
  Prisma.StringNullableWithAggregatesFilter & {
    equals?: S | null;
    in?: S | S[] | null;
    notIn?: S | S[] | null;
    not?: TypedNestedStringNullableWithAggregatesFilter<S> | S | null;
  };

/**
 * A typed version of StringFieldUpdateOperationsInput, allowing narrowing of string types
 * to discriminated unions.
 */
export type TypedStringFieldUpdateOperationsInput<S extends string> =
  //@ts-ignore - When Prisma.StringFieldUpdateOperationsInput is not present, this type is not used
  Prisma.StringFieldUpdateOperationsInput & {
    set?: S;
  };

/**
 * A typed version of NullableStringFieldUpdateOperationsInput, allowing narrowing of
 * string types to discriminated unions.
 */
export type TypedNullableStringFieldUpdateOperationsInput<S extends string> =
  //@ts-ignore - When Prisma.NullableStringFieldUpdateOperationsInput is not present, this type is not used
  Prisma.NullableStringFieldUpdateOperationsInput & {
    set?: S | null;
  };

/**
 * A typed version of StringNullableListFilter, allowing narrowing of string types to
 * discriminated unions.
 */
export type TypedStringNullableListFilter<S extends string> =
  //@ts-ignore - When Prisma.StringNullableListFilter is not present, this type is not used
  Prisma.StringNullableListFilter & {
    equals?: S | S[] | null;
    has?: S | null;
    hasEvery?: S | S[];
    hasSome?: S | S[];
  };

/**
 * A typed version of the input type to update a string[] field, allowing narrowing of
 * string types to discriminated unions.
 */
export type UpdateStringArrayInput<S extends string> = {
  set?: S | S[];
  push?: S | S[];
};

/**
 * A typed version of the input type to create a string[] field, allowing narrowing of
 * string types to discriminated unions.
 */
export type CreateStringArrayInput<S extends string> = {
  set?: S | S[];
};
"#;

/// The utility type block for namespace `ns`, trimmed.
pub fn create_namespace(ns: &str) -> String {
    UTILITY_TYPES.trim().replace(NAMESPACE_PLACEHOLDER, ns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_the_namespace_placeholder() {
        let block = create_namespace("PrismaJson");
        assert!(block.starts_with("declare global {\n  namespace PrismaJson {}\n}"));
        assert!(!block.contains(NAMESPACE_PLACEHOLDER));
        assert!(block.ends_with("};"));
    }

    #[test]
    fn only_the_namespace_varies() {
        let a = create_namespace("A");
        let b = create_namespace("Bcd");
        assert_eq!(a.replace("namespace A {}", "namespace Bcd {}"), b);
    }

    #[test]
    fn every_alias_used_by_replacements_is_declared() {
        let block = create_namespace("PrismaJson");
        let referenced = crate::classify::rules()
            .iter()
            .filter_map(|rule| match rule.action {
                crate::classify::Action::Replace(template) => Some(template),
                crate::classify::Action::Skip => None,
            })
            .flat_map(|template| template.split(|c: char| !c.is_alphanumeric()))
            .filter(|word| {
                word.starts_with("Typed")
                    || word.ends_with("ManyInput")
                    || word.ends_with("ListFilter")
                    || word.ends_with("ArrayInput")
            })
            .collect::<std::collections::BTreeSet<_>>();
        assert!(!referenced.is_empty());
        for alias in referenced {
            assert!(
                block.contains(&format!("export type {alias}<")),
                "{alias} missing from utility block"
            );
        }
        assert!(block.contains("export type UpdateInput<T>"));
    }
}
